//! Package pin mapping for the 20-pin ATtiny167.
//!
//! ```txt
//!  pin:  1   2   3   4   5    6    7   8   9   10
//!        PA0 PA1 PA2 PA3 AVCC AGND PA4 PA5 PA6 PA7
//!  pin:  11  12  13  14  15   16   17  18  19  20
//!        PB7 PB6 PB5 PB4 VCC  GND  PB3 PB2 PB1 PB0
//! ```
//!
//! The supply pins keep their place in the numbering, so every range after
//! them has to skip them explicitly.

use super::gpio::Port;
use crate::hal::gpio::Pin;

/// Highest package pin number.
pub const PIN_COUNT: u8 = 20;

/// AVCC, AGND, VCC and GND.
pub const SUPPLY_PINS: [u8; 4] = [5, 6, 15, 16];

/// External interrupt 1 (PA3).
pub const INT1: Pin = Pin::new(4);

/// Whether the pin is a GPIO.
pub const fn valid(id: u8) -> bool {
    if id == 0 || id > PIN_COUNT {
        return false;
    }
    !matches!(id, 5 | 6 | 15 | 16)
}

/// Port of a GPIO pin.
pub const fn port(id: u8) -> Option<Port> {
    if !valid(id) {
        None
    } else if id <= 10 {
        Some(Port::A)
    } else {
        Some(Port::B)
    }
}

/// Bit number of a GPIO pin inside its port registers.
pub const fn bit(id: u8) -> Option<u8> {
    if !valid(id) {
        None
    } else if id <= 4 {
        Some(id - 1)
    } else if id <= 10 {
        // skip AVCC/AGND
        Some(id - 3)
    } else if id <= 14 {
        // port B runs backwards from PB7
        Some(18 - id)
    } else {
        // skip VCC/GND
        Some(20 - id)
    }
}

/// Port and single-bit mask for a pin, `None` for anything that is not a
/// GPIO.
pub const fn locate(pin: Pin) -> Option<(Port, u8)> {
    match (port(pin.id()), bit(pin.id())) {
        (Some(port), Some(bit)) => Some((port, 1 << bit)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_and_out_of_range_pins_are_invalid() {
        for id in [0, 5, 6, 15, 16, 21, 200, 255] {
            assert!(!valid(id), "pin {id} should be invalid");
            assert_eq!(locate(Pin::new(id)), None);
        }
    }

    #[test]
    fn mapping_matches_package_pinout() {
        let expected = [
            (1, Port::A, 0),
            (2, Port::A, 1),
            (3, Port::A, 2),
            (4, Port::A, 3),
            (7, Port::A, 4),
            (8, Port::A, 5),
            (9, Port::A, 6),
            (10, Port::A, 7),
            (11, Port::B, 7),
            (12, Port::B, 6),
            (13, Port::B, 5),
            (14, Port::B, 4),
            (17, Port::B, 3),
            (18, Port::B, 2),
            (19, Port::B, 1),
            (20, Port::B, 0),
        ];
        for (id, port, bit) in expected {
            assert_eq!(locate(Pin::new(id)), Some((port, 1 << bit)), "pin {id}");
        }
    }

    #[test]
    fn every_port_bit_is_used_exactly_once() {
        let mut seen = [0u8; 2];
        for id in 1..=PIN_COUNT {
            if let Some((port, mask)) = locate(Pin::new(id)) {
                let idx = port as usize;
                assert_eq!(seen[idx] & mask, 0, "pin {id} collides");
                seen[idx] |= mask;
            }
        }
        assert_eq!(seen, [0xFF, 0xFF]);
    }
}
