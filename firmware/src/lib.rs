//! SimpleClock application layer.
//!
//! Everything between the drivers and the reset vector: pin assignment,
//! the clock context that owns the bus, the refresh and alarm logic, the
//! console logger and the alarm interrupt handler. The AVR entry point in
//! `main.rs` only wires these together.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod context;
pub mod irq;
pub mod logger;

pub use config::{ClockConfig, DisplaySettings};
pub use context::ClockContext;
