//! Shared `no_std` primitives for the clock firmware.
//!
//! - [`sync`]: locks and signals that are safe to share between the main
//!   loop and interrupt handlers
//! - [`arch`]: per-architecture interrupt masking

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

pub mod arch;
pub mod sync;
