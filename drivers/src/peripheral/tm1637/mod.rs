//! TM1637 4-digit LED display driver.
//!
//! The TM1637 speaks a two-wire protocol without addresses, LSB first and
//! much slower than standard-mode I2C. It still acknowledges each byte, so
//! the same [`TwoWire`] engine drives it, on its own pair of pins.
//!
//! A full refresh is three transactions:
//!
//! | bytes                    | meaning                              |
//! |--------------------------|--------------------------------------|
//! | `0x40`                   | data command, auto-increment address |
//! | `0xC0 s0 s1 s2 s3`       | address 0, then the segment bytes    |
//! | `0x80 \| 0x08 \| b`       | display on at brightness `b` (0-7)   |

pub mod segments;

use log::trace;

use crate::hal::gpio::GpioController;
use crate::hal::timer::Delay;
use crate::twi::{BitOrder, BusIo, Lines, Timing, TwiConfig, TwoWire};
pub use segments::{NUM_DIGITS, encode_number};

const CMD_DATA: u8 = 0x40;
const CMD_ADDRESS: u8 = 0xC0;
const CMD_CONTROL: u8 = 0x80;
const DISPLAY_ON: u8 = 0x08;
const BRIGHTNESS_MASK: u8 = 0x07;

/// Brightness of the startup frame.
pub const STARTUP_BRIGHTNESS: u8 = 1;

/// TM1637 on a pair of pins.
#[derive(Debug, Copy, Clone)]
pub struct Tm1637 {
    lines: Lines,
}

impl Tm1637 {
    pub const CONFIG: TwiConfig = TwiConfig::new(
        BitOrder::LsbFirst,
        Timing {
            low_us: 100,
            high_us: 100,
        },
    );

    /// `lines.scl` is the module's CLK pin, `lines.sda` its DIO pin.
    pub const fn new(lines: Lines) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> Lines {
        self.lines
    }

    /// Release the lines and greet.
    pub fn init<G: GpioController, D: Delay>(&self, io: &mut BusIo<G, D>) {
        TwoWire::new(io, self.lines, Self::CONFIG).init();
        self.show_frame(io, &segments::STARTUP, STARTUP_BRIGHTNESS);
    }

    /// Show raw segment bytes. Only the low 3 bits of `brightness` count.
    pub fn show_frame<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        segs: &[u8; NUM_DIGITS],
        brightness: u8,
    ) {
        trace!("display {:02x?} at {}", segs, brightness);
        self.command(io, &[CMD_DATA]);

        let mut frame = [CMD_ADDRESS; NUM_DIGITS + 1];
        frame[1..].copy_from_slice(segs);
        self.command(io, &frame);

        self.command(io, &[CMD_CONTROL | DISPLAY_ON | (brightness & BRIGHTNESS_MASK)]);
    }

    /// Show the last four decimal digits of `num`.
    pub fn show_number<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        num: u16,
        colon: bool,
        pad: bool,
        brightness: u8,
    ) {
        self.show_frame(io, &encode_number(num, colon, pad), brightness);
    }

    /// Blank the display; RAM contents are kept.
    pub fn display_off<G: GpioController, D: Delay>(&self, io: &mut BusIo<G, D>) {
        self.command(io, &[CMD_CONTROL]);
    }

    fn command<G: GpioController, D: Delay>(&self, io: &mut BusIo<G, D>, bytes: &[u8]) {
        let mut bus = TwoWire::new(io, self.lines, Self::CONFIG);
        bus.start(None, false);
        for &byte in bytes {
            bus.write(byte);
        }
        bus.stop();
    }
}
