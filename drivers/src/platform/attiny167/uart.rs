//! ATtiny167 LIN/UART Driver (UART mode, transmit only)
//!
//! The LIN controller doubles as a plain UART. The console only sends, so
//! the receiver stays off.

use super::timer::F_CPU;
use crate::hal::serial::{DataBits, Parity, SerialConfig, SerialError, SerialPort, StopBits};
use crate::hw::attiny167 as hw;

/// Bit-time prescaler. 26 gives a small divisor error at 9600 baud from a
/// 1 MHz clock.
const LBT: u32 = 26;

/// LIN/UART in UART mode.
#[derive(Debug)]
pub struct LinUart {
    configured: bool,
}

impl LinUart {
    /// # Safety
    ///
    /// Only one instance may exist; it owns the LIN controller registers.
    pub const unsafe fn new() -> Self {
        Self { configured: false }
    }

    /// Baud rate register value, rounded to nearest.
    fn divisor(baud_rate: u32) -> Result<u16, SerialError> {
        if baud_rate == 0 {
            return Err(SerialError::InvalidConfig);
        }
        let step = LBT * baud_rate;
        let div = (F_CPU + step / 2) / step;
        if div == 0 || div > 0x1000 {
            return Err(SerialError::InvalidConfig);
        }
        Ok((div - 1) as u16)
    }

    /// `LCONF` field for a frame format.
    fn frame_bits(config: &SerialConfig) -> Result<u8, SerialError> {
        if config.data_bits != DataBits::Eight || config.stop_bits != StopBits::One {
            return Err(SerialError::InvalidConfig);
        }
        Ok(match config.parity {
            Parity::None => 0b00,
            Parity::Even => 0b01,
            Parity::Odd => 0b10,
        })
    }
}

impl SerialPort for LinUart {
    fn configure(&mut self, config: SerialConfig) -> Result<(), SerialError> {
        let div = Self::divisor(config.baud_rate)?;
        let lconf = Self::frame_bits(&config)?;

        // SAFETY: LinUart owns the LIN controller.
        unsafe {
            hw::write(hw::LINCR, hw::LINCR_LSWRES);
            hw::write(hw::LINBTR, hw::LINBTR_LDISR | LBT as u8);
            hw::write(hw::LINBRRL, (div & 0xFF) as u8);
            hw::write(hw::LINBRRH, (div >> 8) as u8);
            hw::write(hw::LINENIR, 0);
            hw::write(
                hw::LINCR,
                hw::LINCR_LENA
                    | hw::LINCR_LCMD2
                    | hw::LINCR_LCMD0
                    | (lconf << hw::LINCR_LCONF_SHIFT),
            );
        }

        self.configured = true;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        if !self.configured {
            return Err(SerialError::NotConfigured);
        }
        self.flush()?;
        // SAFETY: LinUart owns the LIN controller.
        unsafe { hw::write(hw::LINDAT, byte) };
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        // SAFETY: LinUart owns the LIN controller.
        while unsafe { hw::read(hw::LINSIR) } & hw::LINSIR_LBUSY != 0 {
            core::hint::spin_loop();
        }
        Ok(())
    }
}
