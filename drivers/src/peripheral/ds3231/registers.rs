//! DS3231 register map.

use bitflags::bitflags;

/// 7-bit bus address.
pub const ADDRESS: u8 = 0x68;

pub const SECONDS: u8 = 0x00;
pub const MINUTES: u8 = 0x01;
pub const HOURS: u8 = 0x02;
pub const WEEKDAY: u8 = 0x03;
pub const DAY: u8 = 0x04;
pub const MONTH: u8 = 0x05;
pub const YEAR: u8 = 0x06;

pub const ALARM1_SECONDS: u8 = 0x07;
pub const ALARM2_MINUTES: u8 = 0x0B;

pub const CONTROL: u8 = 0x0E;
pub const STATUS: u8 = 0x0F;
pub const AGING: u8 = 0x10;
pub const TEMP_MSB: u8 = 0x11;
pub const TEMP_LSB: u8 = 0x12;

/// Month register bit flagging the next century.
pub const CENTURY: u8 = 0x80;

/// Hours register value bits in 24 hour mode.
pub const HOURS_MASK: u8 = 0x3F;

/// Alarm register bit: ignore this field when matching.
pub const ALARM_MASK: u8 = 0x80;

bitflags! {
    /// Control register (0x0E).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u8 {
        /// Alarm 1 interrupt enable
        const A1IE = 1 << 0;
        /// Alarm 2 interrupt enable
        const A2IE = 1 << 1;
        /// INT/SQW pin signals alarms instead of the square wave
        const INTCN = 1 << 2;
        const RS1 = 1 << 3;
        const RS2 = 1 << 4;
        const CONV = 1 << 5;
        const BBSQW = 1 << 6;
        /// Oscillator disabled on battery
        const EOSC = 1 << 7;
    }
}

bitflags! {
    /// Status register (0x0F).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Alarm 1 matched
        const A1F = 1 << 0;
        /// Alarm 2 matched
        const A2F = 1 << 1;
        const BSY = 1 << 2;
        const EN32KHZ = 1 << 3;
        /// Oscillator stopped at some point
        const OSF = 1 << 7;
    }
}

/// Packed BCD as used by the time and date registers.
pub mod bcd {
    /// `d` must be in 0..=99.
    pub const fn encode(d: u8) -> u8 {
        ((d / 10) << 4) | (d % 10)
    }

    pub const fn decode(b: u8) -> u8 {
        (b >> 4) * 10 + (b & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bcd_decode_inverts_encode(d in 0u8..=99) {
            prop_assert_eq!(bcd::decode(bcd::encode(d)), d);
        }

        #[test]
        fn bcd_nibbles_are_decimal_digits(d in 0u8..=99) {
            let b = bcd::encode(d);
            prop_assert!(b >> 4 <= 9);
            prop_assert!(b & 0x0F <= 9);
        }
    }

    #[test]
    fn bcd_known_values() {
        assert_eq!(bcd::encode(0), 0x00);
        assert_eq!(bcd::encode(7), 0x07);
        assert_eq!(bcd::encode(59), 0x59);
        assert_eq!(bcd::decode(0x23), 23);
    }

    #[test]
    fn flag_bit_positions() {
        assert_eq!((Control::INTCN | Control::A1IE).bits(), 0x05);
        assert_eq!(Status::A1F.bits(), 0x01);
    }
}
