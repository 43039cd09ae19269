//! External interrupt 1, wired to the RTC's active-low INT/SQW output.

use super::gpio::Attiny167Gpio;
use super::pins;
use crate::hal::gpio::{GpioController, PinLevel, PinMode};
use crate::hw::attiny167 as hw;

/// Configure INT1 for falling edges and unmask it.
///
/// The RTC output is open drain, so the pin gets the internal pull-up.
///
/// # Safety
/// A handler for the INT1 vector must be linked in.
pub unsafe fn enable_int1(gpio: &mut Attiny167Gpio) {
    gpio.set_mode(pins::INT1, PinMode::Input);
    gpio.write(pins::INT1, PinLevel::High);

    unsafe {
        hw::modify(hw::EICRA, |v| (v & !(hw::ISC11 | hw::ISC10)) | hw::ISC11);
        hw::write(hw::EIFR, hw::INTF1);
        hw::modify(hw::EIMSK, |v| v | hw::INT1);
    }
}

/// Clear a latched INT1 edge (write-one-to-clear).
pub fn clear_int1() {
    // SAFETY: EIFR bits are write-one-to-clear; other flags are unaffected.
    unsafe { hw::write(hw::EIFR, hw::INTF1) };
}
