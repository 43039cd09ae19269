//! Bit-banged two-wire serial engine.
//!
//! Both external chips hang off plain GPIO pins, so start/stop conditions,
//! bit timing and acknowledgment are all produced in software here.
//!
//! # Electrical model
//!
//! Both lines are open drain with external pull-ups. A line is either
//! *driven low* (output, latch 0) or *released* (input, the pull-up makes it
//! high). The engine never configures a line as output-high: the output
//! latch is forced low before every switch to output, so another device
//! pulling the same line low can never be shorted against.
//!
//! # Framing
//!
//! ```txt
//! IDLE -> start() -> STARTED -> [address ack] -> ADDRESSED
//!      -> write()/read()* -> TRANSFER -> stop() -> STOPPED
//! ```
//!
//! `start()` may be issued again without a `stop()` (repeated start).
//!
//! # Clock stretching
//!
//! Before each clock high phase the engine waits for SCL to actually read
//! high. The wait has no timeout: a peer that never releases SCL hangs the
//! caller.

use log::{debug, error, trace, warn};

use crate::hal::gpio::{GpioController, Pin, PinLevel, PinMode};
use crate::hal::timer::Delay;

/// Everything a transaction needs from the board: pins and a way to wait.
///
/// Owned by whoever serializes bus access and lent to a [`TwoWire`] for
/// the length of one transaction.
#[derive(Debug)]
pub struct BusIo<G, D> {
    pub gpio: G,
    pub delay: D,
}

impl<G, D> BusIo<G, D> {
    pub const fn new(gpio: G, delay: D) -> Self {
        Self { gpio, delay }
    }
}

/// Clock and data pins of one bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Lines {
    pub scl: Pin,
    pub sda: Pin,
}

impl Lines {
    pub const fn new(scl: u8, sda: u8) -> Self {
        Self {
            scl: Pin::new(scl),
            sda: Pin::new(sda),
        }
    }
}

/// Order in which the 8 data bits of a byte go on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BitOrder {
    /// I2C devices.
    MsbFirst,
    /// TM1637-style display controllers.
    LsbFirst,
}

impl BitOrder {
    /// Bit number of the `n`th bit on the wire (`n` in 0..8).
    pub const fn bit(self, n: u8) -> u8 {
        match self {
            BitOrder::MsbFirst => 7 - n,
            BitOrder::LsbFirst => n,
        }
    }
}

/// Half-period lengths of the clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timing {
    /// SCL low phase, also used for setup before a start and after a stop.
    pub low_us: u32,
    /// SCL high phase, also used as start/stop hold time.
    pub high_us: u32,
}

impl Timing {
    /// Standard mode (100 kHz): 4.7 µs low / 4.0 µs high, rounded.
    pub const STANDARD: Timing = Timing {
        low_us: 5,
        high_us: 4,
    };
}

/// Engine configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TwiConfig {
    pub bit_order: BitOrder,
    pub timing: Timing,
}

impl TwiConfig {
    /// Addressed I2C, MSB first, standard mode.
    pub const STANDARD: TwiConfig = TwiConfig::new(BitOrder::MsbFirst, Timing::STANDARD);

    pub const fn new(bit_order: BitOrder, timing: Timing) -> Self {
        Self { bit_order, timing }
    }
}

/// Position in the transaction framing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusState {
    Idle,
    Started,
    Addressed,
    Transfer,
    Stopped,
}

/// Two-wire bus master over two GPIO pins.
///
/// Holds no lock: the caller guarantees nothing else drives these pins
/// until the transaction is finished.
pub struct TwoWire<'a, G, D> {
    io: &'a mut BusIo<G, D>,
    lines: Lines,
    config: TwiConfig,
    state: BusState,
    lines_valid: bool,
}

impl<'a, G: GpioController, D: Delay> TwoWire<'a, G, D> {
    pub fn new(io: &'a mut BusIo<G, D>, lines: Lines, config: TwiConfig) -> Self {
        let lines_valid = io.gpio.valid(lines.scl) && io.gpio.valid(lines.sda);
        Self {
            io,
            lines,
            config,
            state: BusState::Idle,
            lines_valid,
        }
    }

    pub fn state(&self) -> BusState {
        self.state
    }

    pub fn config(&self) -> TwiConfig {
        self.config
    }

    /// Put both lines in the released state with their latches low.
    pub fn init(&mut self) {
        if !self.lines_valid {
            error!("two-wire bus on invalid pins {:?}", self.lines);
        }
        let Lines { scl, sda } = self.lines;
        self.io.gpio.set_mode(scl, PinMode::Input);
        self.io.gpio.set_mode(sda, PinMode::Input);
        self.io.gpio.write(scl, PinLevel::Low);
        self.io.gpio.write(sda, PinLevel::Low);
        self.state = BusState::Idle;
    }

    /// Issue a start (or repeated start) condition.
    ///
    /// With an address, sends `(address << 1) | read` and returns whether
    /// the target acknowledged. Without one only bus ownership is taken
    /// and the result is always `true`.
    pub fn start(&mut self, address: Option<u8>, read: bool) -> bool {
        if matches!(self.state, BusState::Addressed | BusState::Transfer) {
            trace!("repeated start");
        }

        let Lines { scl, sda } = self.lines;
        self.release(sda);
        self.delay_low();
        self.release(scl);
        self.wait_for_clock();
        self.delay_low();

        // SDA falls while SCL is high.
        self.pull_low(sda);
        self.delay_high();
        self.pull_low(scl);
        self.state = BusState::Started;

        let Some(address) = address else {
            return true;
        };

        if !self.transfer((address << 1) | read as u8) {
            error!("no ack for address {:#04x}", address);
            return false;
        }
        self.state = BusState::Addressed;
        true
    }

    /// Send one byte; returns the acknowledgment.
    ///
    /// A missing ack is logged but the transaction is left open.
    pub fn write(&mut self, byte: u8) -> bool {
        self.enter_transfer();
        let ack = self.transfer(byte);
        if !ack {
            warn!("no ack for byte {:#04x}", byte);
        }
        ack
    }

    /// Receive one byte, then acknowledge it, or NACK it if it is the
    /// last one wanted.
    pub fn read(&mut self, is_last: bool) -> u8 {
        self.enter_transfer();
        let sda = self.lines.sda;
        let order = self.config.bit_order;

        self.release(sda);
        let mut byte = 0u8;
        for n in 0..8 {
            self.delay_low();
            self.clock_high();
            if self.io.gpio.read(sda).is_high() {
                byte |= 1 << order.bit(n);
            }
            self.clock_low();
        }

        if is_last {
            self.release(sda);
        } else {
            self.pull_low(sda);
        }
        self.delay_low();
        self.clock_high();
        self.clock_low();
        self.release(sda);

        byte
    }

    /// Issue a stop condition and let the bus settle.
    pub fn stop(&mut self) {
        let Lines { scl, sda } = self.lines;
        self.pull_low(scl);
        self.pull_low(sda);
        self.delay_low();

        // SDA rises while SCL is high.
        self.release(scl);
        self.wait_for_clock();
        self.delay_high();
        self.release(sda);
        self.delay_low();

        self.state = BusState::Stopped;
    }

    /// Shift out 8 bits and sample the acknowledgment.
    fn transfer(&mut self, byte: u8) -> bool {
        let sda = self.lines.sda;
        let order = self.config.bit_order;

        // SCL is low on entry: data may only change now.
        for n in 0..8 {
            if byte & (1 << order.bit(n)) != 0 {
                self.release(sda);
            } else {
                self.pull_low(sda);
            }
            self.delay_low();
            self.clock_high();
            self.clock_low();
        }

        self.release(sda);
        self.delay_low();
        self.clock_high();
        // Nothing can answer on pins that do not exist.
        let ack = self.lines_valid && self.io.gpio.read(sda).is_low();
        self.clock_low();

        ack
    }

    fn enter_transfer(&mut self) {
        if matches!(self.state, BusState::Idle | BusState::Stopped) {
            debug!("byte transfer outside a transaction");
        }
        self.state = BusState::Transfer;
    }

    fn release(&mut self, line: Pin) {
        self.io.gpio.set_mode(line, PinMode::Input);
    }

    fn pull_low(&mut self, line: Pin) {
        // Latch first, so the pin never drives high.
        self.io.gpio.write(line, PinLevel::Low);
        self.io.gpio.set_mode(line, PinMode::Output);
    }

    /// Release SCL, wait for it to rise, hold the high phase.
    fn clock_high(&mut self) {
        self.release(self.lines.scl);
        self.wait_for_clock();
        self.delay_high();
    }

    fn clock_low(&mut self) {
        self.pull_low(self.lines.scl);
    }

    /// Spin until SCL reads high. Unbounded.
    fn wait_for_clock(&mut self) {
        if !self.lines_valid {
            return;
        }
        while self.io.gpio.read(self.lines.scl).is_low() {
            core::hint::spin_loop();
        }
    }

    fn delay_low(&mut self) {
        self.io.delay.delay_us(self.config.timing.low_us);
    }

    fn delay_high(&mut self) {
        self.io.delay.delay_us(self.config.timing.high_us);
    }
}

#[cfg(test)]
mod tests;
