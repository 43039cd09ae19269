//! Peripheral Drivers
//!
//! Chips reached over the bit-banged [`twi`](crate::twi) engine. Drivers
//! hold only their pin assignment and borrow the bus resources per call,
//! so the caller decides how access is serialized.
//!
//! # Available Peripherals
//!
//! - [`ds3231`]: Maxim DS3231 real-time clock
//! - [`tm1637`]: TM1637 4-digit LED display controller

pub mod ds3231;
pub mod tm1637;
