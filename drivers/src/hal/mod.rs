//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines generic traits for interacting with hardware
//! peripherals. These traits are implemented by platform-specific
//! drivers and by the simulated board, allowing the bus engine and the
//! device adapters to be written in a platform-independent manner.
//!
//! # Available Interfaces
//!
//! - [`gpio`]: General Purpose Input/Output control
//! - [`serial`]: Serial port (UART) output for the log console
//! - [`timer`]: Busy-wait delays

pub mod gpio;
pub mod serial;
pub mod timer;
