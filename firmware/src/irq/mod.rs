//! Interrupt handling.
//!
//! Handlers run with interrupts masked and must never touch the bus; they
//! only raise signals for the main loop.

pub mod handlers;
