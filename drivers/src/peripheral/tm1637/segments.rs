//! Seven-segment encoding.
//!
//! ```txt
//!  AA
//! F  B
//!  GG
//! E  C
//!  DD   P
//! ```
//!
//! Bits are `P G F E D C B A`, MSB first. On modules with a colon the dot
//! of the second digit drives the colon.

/// Digits per module.
pub const NUM_DIGITS: usize = 4;

/// Dot segment.
pub const DOT: u8 = 0x80;

/// Position whose dot is wired to the colon.
pub const COLON_DIGIT: usize = 1;

/// Segments for the hex digits 0 through F.
pub const DIGITS: [u8; 16] = [
    0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, //
    0x7f, 0x6f, 0x77, 0x7c, 0x39, 0x5e, 0x79, 0x71,
];

/// "Hi", shown until the first time is read.
pub const STARTUP: [u8; NUM_DIGITS] = [0x00, 0x76, 0x04, 0x00];

/// Segments for the last four decimal digits of `num`.
///
/// Without `pad`, zeros before the most significant non-zero digit are
/// blanked; the last digit always shows.
pub fn encode_number(num: u16, colon: bool, pad: bool) -> [u8; NUM_DIGITS] {
    let mut segs = [0u8; NUM_DIGITS];
    let mut first_nonzero = NUM_DIGITS - 1;
    let mut rest = num;

    for pos in (0..NUM_DIGITS).rev() {
        let digit = usize::from(rest % 10);
        segs[pos] = DIGITS[digit];
        if digit > 0 {
            first_nonzero = pos;
        }
        rest /= 10;
    }

    if colon {
        segs[COLON_DIGIT] |= DOT;
    }

    if !pad {
        for seg in &mut segs[..first_nonzero] {
            *seg &= !DIGITS[0];
        }
    }

    segs
}
