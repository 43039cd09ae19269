//! Architecture selection.
//!
//! Exposes the interrupt-masking implementation for the target as
//! [`CurrentIrq`].

cfg_if::cfg_if! {
    if #[cfg(target_arch = "avr")] {
        pub mod avr;
        pub use avr::irq::AvrIrq as CurrentIrq;
    } else {
        pub mod host;
        pub use host::irq::HostIrq as CurrentIrq;
    }
}
