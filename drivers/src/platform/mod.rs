//! Platform Abstraction Layer
//!
//! Each supported chip implements [`Platform`]; the firmware only talks to
//! `CurrentPlatform`, selected by Cargo feature.
//!
//! # Usage
//!
//! ```rust,ignore
//! use drivers::platform::{CurrentPlatform as Platform, Platform as PlatformTrait};
//!
//! unsafe { Platform::early_init(); }
//! let gpio = unsafe { Platform::gpio() };
//! ```

use crate::hal::gpio::GpioController;
use crate::hal::serial::{SerialConfig, SerialError, SerialPort};
use crate::hal::timer::Delay;

/// Platform trait - implemented by each supported chip
pub trait Platform {
    /// GPIO controller driving the bus lines.
    type Gpio: GpioController;
    /// Busy-wait delay provider.
    type Delay: Delay;
    /// Console UART for log output.
    type Console: SerialPort;

    /// Platform name for debugging
    fn name() -> &'static str;

    /// Put every pin in a known state (input, latch low).
    ///
    /// # Safety
    /// Must only be called once, before any driver touches the pins.
    unsafe fn early_init();

    /// Take the GPIO controller.
    ///
    /// # Safety
    /// Must only be called once.
    unsafe fn gpio() -> Self::Gpio;

    /// A delay provider. Delays carry no state, so any number may exist.
    fn delay() -> Self::Delay;

    /// Configure the console UART.
    ///
    /// # Safety
    /// Must only be called once.
    unsafe fn init_console(config: SerialConfig) -> Result<Self::Console, SerialError>;

    /// Route the RTC alarm line to an interrupt, falling edge.
    ///
    /// # Safety
    /// The alarm interrupt handler must be installed.
    unsafe fn init_alarm_interrupt(gpio: &mut Self::Gpio);

    /// Drop a latched alarm edge.
    fn clear_alarm_interrupt();
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "attiny167")] {
        pub mod attiny167;
        pub use attiny167::Attiny167Platform as CurrentPlatform;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features attiny167"
        );
    }
}
