//! Maxim DS3231 Real-Time Clock Driver
//!
//! The DS3231 sits on an addressed two-wire bus (address `0x68`, MSB
//! first, standard mode). Every operation is one or more complete
//! transactions on a [`TwoWire`] borrowed from the caller's [`BusIo`].
//!
//! # Register Access
//!
//! Writes put the register number after the address and the data after
//! that; the chip auto-increments. Reads write the register number, then
//! issue a repeated start in read mode and NACK the last byte.
//!
//! # Example
//!
//! ```ignore
//! use drivers::peripheral::ds3231::{Ds3231, Time};
//! use drivers::twi::Lines;
//!
//! let rtc = Ds3231::new(Lines::new(18, 20));
//! rtc.init(&mut io)?;
//! rtc.write_time(&mut io, &Time::new(12, 30, 0))?;
//! ```

pub mod registers;

use core::fmt;

use log::debug;

use crate::hal::gpio::GpioController;
use crate::hal::timer::Delay;
use crate::twi::{BusIo, Lines, TwiConfig, TwoWire};
use registers::{ALARM_MASK, CENTURY, Control, HOURS_MASK, Status, bcd};

/// First year the date registers can hold.
pub const MIN_YEAR: u16 = 2000;
/// Last year the date registers can hold.
pub const MAX_YEAR: u16 = 2199;

/// RTC operation errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RtcError {
    /// Nothing acknowledged the address.
    AddressNack,
    /// A time or date field the registers cannot represent.
    OutOfRange,
}

impl fmt::Display for RtcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::AddressNack => write!(f, "RTC did not acknowledge its address"),
            RtcError::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// Time of day, 24 hour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Time {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Calendar date. Only the field ranges are checked, not the calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl Date {
    pub const fn new(day: u8, month: u8, year: u16) -> Self {
        Self { day, month, year }
    }

    pub const fn is_valid(&self) -> bool {
        self.day >= 1
            && self.day <= 31
            && self.month >= 1
            && self.month <= 12
            && self.year >= MIN_YEAR
            && self.year <= MAX_YEAR
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// Die temperature with 0.25 °C resolution.
///
/// `integer` is the signed whole-degree register and `fraction` the
/// hundredths added on top of it (0, 25, 50 or 75), so -0.25 °C reads as
/// `integer = -1, fraction = 75`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Temperature {
    pub integer: i8,
    pub fraction: u8,
}

impl Temperature {
    pub const fn from_registers(msb: u8, lsb: u8) -> Self {
        Self {
            integer: msb as i8,
            fraction: (lsb >> 6) * 25,
        }
    }

    /// Temperature in quarter degrees.
    pub const fn quarters(&self) -> i16 {
        self.integer as i16 * 4 + (self.fraction / 25) as i16
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.quarters();
        let sign = if q < 0 { "-" } else { "" };
        let q = q.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, q / 4, (q % 4) * 25)
    }
}

/// DS3231 on a pair of bus lines.
#[derive(Debug, Copy, Clone)]
pub struct Ds3231 {
    lines: Lines,
}

impl Ds3231 {
    pub const CONFIG: TwiConfig = TwiConfig::STANDARD;

    pub const fn new(lines: Lines) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> Lines {
        self.lines
    }

    /// Square wave off, alarm interrupts off.
    pub fn init<G: GpioController, D: Delay>(&self, io: &mut BusIo<G, D>) -> Result<(), RtcError> {
        TwoWire::new(io, self.lines, Self::CONFIG).init();
        self.write_registers(io, registers::CONTROL, &[Control::INTCN.bits()])
    }

    pub fn read_time<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
    ) -> Result<Time, RtcError> {
        let mut raw = [0u8; 3];
        self.read_registers(io, registers::SECONDS, &mut raw)?;
        Ok(Time {
            second: bcd::decode(raw[0]),
            minute: bcd::decode(raw[1]),
            hour: bcd::decode(raw[2] & HOURS_MASK),
        })
    }

    pub fn write_time<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        time: &Time,
    ) -> Result<(), RtcError> {
        if !time.is_valid() {
            return Err(RtcError::OutOfRange);
        }
        let raw = [
            bcd::encode(time.second),
            bcd::encode(time.minute),
            bcd::encode(time.hour),
        ];
        self.write_registers(io, registers::SECONDS, &raw)
    }

    pub fn read_date<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
    ) -> Result<Date, RtcError> {
        let mut raw = [0u8; 3];
        self.read_registers(io, registers::DAY, &mut raw)?;
        let century = u16::from(raw[1] & CENTURY != 0);
        Ok(Date {
            day: bcd::decode(raw[0]),
            month: bcd::decode(raw[1] & !CENTURY),
            year: MIN_YEAR + 100 * century + u16::from(bcd::decode(raw[2])),
        })
    }

    pub fn write_date<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        date: &Date,
    ) -> Result<(), RtcError> {
        if !date.is_valid() {
            return Err(RtcError::OutOfRange);
        }
        let since_1900 = date.year - 1900;
        let century = if since_1900 >= 200 { CENTURY } else { 0 };
        let raw = [
            bcd::encode(date.day),
            bcd::encode(date.month) | century,
            bcd::encode((since_1900 % 100) as u8),
        ];
        self.write_registers(io, registers::DAY, &raw)
    }

    pub fn read_temperature<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
    ) -> Result<Temperature, RtcError> {
        let mut raw = [0u8; 2];
        self.read_registers(io, registers::TEMP_MSB, &mut raw)?;
        Ok(Temperature::from_registers(raw[0], raw[1]))
    }

    /// Fire alarm 1 once a minute, at second 0, and route it to INT.
    pub fn arm_alarm<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
    ) -> Result<(), RtcError> {
        let every_minute = [bcd::encode(0), ALARM_MASK, ALARM_MASK, ALARM_MASK];
        self.write_registers(io, registers::ALARM1_SECONDS, &every_minute)?;
        let control = Control::INTCN | Control::A1IE;
        self.write_registers(io, registers::CONTROL, &[control.bits()])?;
        self.ack_alarm(io)
    }

    /// Clear the alarm 1 flag, which releases the INT line.
    pub fn ack_alarm<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
    ) -> Result<(), RtcError> {
        let mut raw = [0u8; 1];
        self.read_registers(io, registers::STATUS, &mut raw)?;
        let mut status = Status::from_bits_retain(raw[0]);
        status.remove(Status::A1F);
        self.write_registers(io, registers::STATUS, &[status.bits()])
    }

    fn write_registers<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        reg: u8,
        data: &[u8],
    ) -> Result<(), RtcError> {
        let mut bus = TwoWire::new(io, self.lines, Self::CONFIG);
        if !bus.start(Some(registers::ADDRESS), false) {
            bus.stop();
            return Err(RtcError::AddressNack);
        }
        bus.write(reg);
        for &byte in data {
            bus.write(byte);
        }
        bus.stop();
        debug!("rtc write {:#04x}: {:02x?}", reg, data);
        Ok(())
    }

    fn read_registers<G: GpioController, D: Delay>(
        &self,
        io: &mut BusIo<G, D>,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), RtcError> {
        let mut bus = TwoWire::new(io, self.lines, Self::CONFIG);
        if !bus.start(Some(registers::ADDRESS), false) {
            bus.stop();
            return Err(RtcError::AddressNack);
        }
        bus.write(reg);
        if !bus.start(Some(registers::ADDRESS), true) {
            bus.stop();
            return Err(RtcError::AddressNack);
        }
        let last = buf.len().saturating_sub(1);
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = bus.read(i == last);
        }
        bus.stop();
        Ok(())
    }
}
