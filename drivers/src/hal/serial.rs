//! Serial Port (UART) Hardware Abstraction Layer.
//!
//! The clock only ever transmits on its serial port (log output), so the
//! trait is write-only.

use core::fmt;

/// Serial port configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Baud rate in bits per second.
    pub baud_rate: u32,
    /// Number of data bits per frame.
    pub data_bits: DataBits,
    /// Parity checking mode.
    pub parity: Parity,
    /// Number of stop bits.
    pub stop_bits: StopBits,
}

impl SerialConfig {
    /// Create a standard 8N1 configuration at the specified baud rate.
    pub const fn new_8n1(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for SerialConfig {
    /// Default configuration: 9600 baud, 8N1.
    fn default() -> Self {
        Self::new_8n1(9600)
    }
}

/// Number of data bits per frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Number of stop bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// Serial port errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SerialError {
    /// The controller cannot produce this frame format or baud rate.
    InvalidConfig,
    /// Write attempted before `configure`.
    NotConfigured,
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::InvalidConfig => f.write_str("invalid serial configuration"),
            SerialError::NotConfigured => f.write_str("serial port not configured"),
        }
    }
}

/// Serial port trait.
pub trait SerialPort {
    /// Configure the serial port.
    ///
    /// This must be called before using the serial port.
    fn configure(&mut self, config: SerialConfig) -> Result<(), SerialError>;

    /// Write a single byte (blocking).
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError>;

    /// Write multiple bytes (blocking).
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SerialError> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(bytes.len())
    }

    /// Block until the last byte has left the shift register.
    fn flush(&mut self) -> Result<(), SerialError>;
}

/// Adapter implementing `core::fmt::Write` for any [`SerialPort`], so
/// `write!` can target it. `\n` goes out as `\r\n`.
pub struct SerialWriter<'a, T: SerialPort + ?Sized>(pub &'a mut T);

impl<T: SerialPort + ?Sized> fmt::Write for SerialWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.0.write_byte(b'\r').map_err(|_| fmt::Error)?;
            }
            self.0.write_byte(byte).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
