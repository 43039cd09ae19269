//! ATtiny167 GPIO Controller Driver
//!
//! Each port has three registers: `DDRx` (direction), `PORTx` (output
//! latch / pull-up enable) and `PINx` (input level). [`PortGpio`] does the
//! pin-number translation once and works against any [`PortRegisters`]
//! backend: the memory-mapped one here, or the simulated board.

use super::pins;
use crate::hal::gpio::{GpioController, Pin, PinLevel, PinMode};
use crate::hw::attiny167 as hw;

/// GPIO port.
#[repr(usize)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Port {
    A = 0,
    B = 1,
}

/// Register within a port.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortReg {
    /// Input level.
    Pin,
    /// Data direction, 1 = output.
    Ddr,
    /// Output latch.
    Port,
}

/// Access to the three registers of each port.
pub trait PortRegisters {
    fn read(&self, port: Port, reg: PortReg) -> u8;
    fn write(&mut self, port: Port, reg: PortReg, value: u8);
}

/// Memory-mapped port registers of the real chip.
#[derive(Debug)]
pub struct Attiny167Ports {
    _private: (),
}

impl Attiny167Ports {
    /// # Safety
    ///
    /// Only one instance may drive the ports at a time, and the code must
    /// be running on an ATtiny167.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    const fn address(port: Port, reg: PortReg) -> usize {
        match (port, reg) {
            (Port::A, PortReg::Pin) => hw::PINA,
            (Port::A, PortReg::Ddr) => hw::DDRA,
            (Port::A, PortReg::Port) => hw::PORTA,
            (Port::B, PortReg::Pin) => hw::PINB,
            (Port::B, PortReg::Ddr) => hw::DDRB,
            (Port::B, PortReg::Port) => hw::PORTB,
        }
    }
}

impl PortRegisters for Attiny167Ports {
    fn read(&self, port: Port, reg: PortReg) -> u8 {
        // SAFETY: address() only yields port register addresses.
        unsafe { hw::read(Self::address(port, reg)) }
    }

    fn write(&mut self, port: Port, reg: PortReg, value: u8) {
        // SAFETY: address() only yields port register addresses.
        unsafe { hw::write(Self::address(port, reg), value) }
    }
}

/// GPIO controller over a set of port registers.
#[derive(Debug, Clone)]
pub struct PortGpio<R> {
    regs: R,
}

impl<R: PortRegisters> PortGpio<R> {
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    fn update(&mut self, pin: Pin, reg: PortReg, set: bool) {
        let Some((port, mask)) = pins::locate(pin) else {
            return;
        };
        let value = self.regs.read(port, reg);
        let value = if set { value | mask } else { value & !mask };
        self.regs.write(port, reg, value);
    }
}

impl<R: PortRegisters> GpioController for PortGpio<R> {
    fn valid(&self, pin: Pin) -> bool {
        pins::valid(pin.id())
    }

    fn set_mode(&mut self, pin: Pin, mode: PinMode) {
        self.update(pin, PortReg::Ddr, mode == PinMode::Output);
    }

    fn write(&mut self, pin: Pin, level: PinLevel) {
        self.update(pin, PortReg::Port, level.is_high());
    }

    fn read(&self, pin: Pin) -> PinLevel {
        match pins::locate(pin) {
            Some((port, mask)) => (self.regs.read(port, PortReg::Pin) & mask != 0).into(),
            None => PinLevel::Low,
        }
    }
}

/// GPIO controller of the real chip.
pub type Attiny167Gpio = PortGpio<Attiny167Ports>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimPorts;

    fn snapshot(ports: &SimPorts) -> [u8; 4] {
        [
            ports.read(Port::A, PortReg::Ddr),
            ports.read(Port::A, PortReg::Port),
            ports.read(Port::B, PortReg::Ddr),
            ports.read(Port::B, PortReg::Port),
        ]
    }

    #[test]
    fn invalid_pins_are_ignored() {
        let ports = SimPorts::new();
        let mut gpio = PortGpio::new(ports.clone());

        // Make sure reads of neighbouring bits would be non-zero.
        for id in 1..=pins::PIN_COUNT {
            gpio.set_mode(Pin::new(id), PinMode::Output);
            gpio.write(Pin::new(id), PinLevel::High);
        }
        let before = snapshot(&ports);

        for id in [0u8, 5, 6, 15, 16, 21, 255] {
            let pin = Pin::new(id);
            assert!(!gpio.valid(pin));
            gpio.set_mode(pin, PinMode::Input);
            gpio.write(pin, PinLevel::Low);
            assert_eq!(gpio.read(pin), PinLevel::Low);
        }
        assert_eq!(snapshot(&ports), before);
    }

    #[test]
    fn output_pins_read_back_written_level() {
        let mut gpio = PortGpio::new(SimPorts::new());

        for id in (1..=pins::PIN_COUNT).filter(|&id| pins::valid(id)) {
            let pin = Pin::new(id);
            assert!(gpio.valid(pin));
            gpio.set_mode(pin, PinMode::Output);

            gpio.write(pin, PinLevel::High);
            assert_eq!(gpio.read(pin), PinLevel::High, "pin {id}");
            gpio.write(pin, PinLevel::Low);
            assert_eq!(gpio.read(pin), PinLevel::Low, "pin {id}");
        }
    }

    #[test]
    fn set_mode_touches_only_its_own_bit() {
        let ports = SimPorts::new();
        let mut gpio = PortGpio::new(ports.clone());

        gpio.set_mode(Pin::new(13), PinMode::Output);
        gpio.set_mode(Pin::new(14), PinMode::Output);
        gpio.set_mode(Pin::new(13), PinMode::Input);

        assert_eq!(ports.read(Port::B, PortReg::Ddr), 1 << 4);
        assert_eq!(ports.read(Port::A, PortReg::Ddr), 0);
    }
}
