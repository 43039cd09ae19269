//! Clock Hardware Drivers
//!
//! Layered from the pins up.
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions (GPIO, delay, serial)
//! - [`platform`]: SoC-specific implementations of those traits
//! - [`twi`]: Bit-banged two-wire bus engine built on [`hal::gpio`]
//! - [`peripheral`]: Device adapters that drive the engine (RTC, display)
//! - `sim`: Simulated board and bus peers for host-side testing
//!
//! # Usage Example
//!
//! ```ignore
//! use drivers::peripheral::ds3231::Ds3231;
//! use drivers::twi::{BusIo, Lines};
//!
//! let mut io = BusIo::new(gpio, delay);
//! let rtc = Ds3231::new(Lines::new(18, 20));
//! let now = rtc.read_time(&mut io)?;
//! ```

#![cfg_attr(not(any(test, feature = "sim")), no_std)]

pub mod hal;
pub mod hw;
pub mod peripheral;
pub mod platform;
pub mod twi;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

// Re-export commonly used types
pub use hal::gpio::{GpioController, Pin, PinLevel, PinMode};
pub use hal::serial::{SerialConfig, SerialPort};
pub use hal::timer::Delay;
pub use twi::{BitOrder, BusIo, Lines, TwiConfig, TwoWire};
