//! Raw register definitions.

pub mod attiny167;
