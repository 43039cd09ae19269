//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! Pins are addressed by their logical (package pin) number. Unlike most
//! HALs, nothing here can fail: operations on a pin the platform does not
//! drive (power and ground pins, out-of-range numbers) are silently
//! ignored, and reads of such pins return [`PinLevel::Low`].

use core::fmt;

/// Logical pin identifier (package pin number).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin(u8);

impl Pin {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u8 {
        self.0
    }
}

impl From<u8> for Pin {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low,
    /// Logic high (VCC).
    High,
}

impl PinLevel {
    pub fn is_high(self) -> bool {
        self == PinLevel::High
    }

    pub fn is_low(self) -> bool {
        self == PinLevel::Low
    }
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

/// Pin direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinMode {
    /// High impedance. With the output latch low this is also "released"
    /// for an open-drain line.
    Input,
    /// Driven from the output latch.
    Output,
}

/// GPIO controller trait.
///
/// A controller owns every pin of the chip. The two-wire engine is written
/// against this trait only, which is how the same engine runs on hardware
/// and against the simulated board.
pub trait GpioController {
    /// Whether the platform can do I/O on `pin`.
    fn valid(&self, pin: Pin) -> bool;

    /// Configure the pin direction. No-op on invalid pins.
    fn set_mode(&mut self, pin: Pin, mode: PinMode);

    /// Set the output latch. On an input pin this selects the pull-up on
    /// platforms that have one. No-op on invalid pins.
    fn write(&mut self, pin: Pin, level: PinLevel);

    /// Read the level present on the pin. `Low` for invalid pins.
    fn read(&self, pin: Pin) -> PinLevel;

    /// Set the pin to logic high.
    fn set_high(&mut self, pin: Pin) {
        self.write(pin, PinLevel::High)
    }

    /// Set the pin to logic low.
    fn set_low(&mut self, pin: Pin) {
        self.write(pin, PinLevel::Low)
    }

    /// Toggle the output latch of a pin.
    fn toggle(&mut self, pin: Pin) {
        let level = self.read(pin);
        self.write(
            pin,
            if level == PinLevel::High {
                PinLevel::Low
            } else {
                PinLevel::High
            },
        )
    }
}

impl<G: GpioController + ?Sized> GpioController for &mut G {
    fn valid(&self, pin: Pin) -> bool {
        (**self).valid(pin)
    }

    fn set_mode(&mut self, pin: Pin, mode: PinMode) {
        (**self).set_mode(pin, mode)
    }

    fn write(&mut self, pin: Pin, level: PinLevel) {
        (**self).write(pin, level)
    }

    fn read(&self, pin: Pin) -> PinLevel {
        (**self).read(pin)
    }
}
