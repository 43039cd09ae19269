//! ATtiny167 platform.

pub mod gpio;
pub mod interrupt;
pub mod pins;
pub mod timer;
pub mod uart;

pub use gpio::{Attiny167Gpio, Attiny167Ports, Port, PortGpio, PortReg, PortRegisters};
pub use timer::BusyWaitDelay;
pub use uart::LinUart;

use super::Platform;
use crate::hal::serial::{SerialConfig, SerialError, SerialPort};

pub struct Attiny167Platform;

impl Platform for Attiny167Platform {
    type Gpio = Attiny167Gpio;
    type Delay = BusyWaitDelay;
    type Console = LinUart;

    fn name() -> &'static str {
        "ATtiny167"
    }

    unsafe fn early_init() {
        let mut ports = unsafe { Attiny167Ports::new() };
        for port in [Port::A, Port::B] {
            ports.write(port, PortReg::Ddr, 0);
            ports.write(port, PortReg::Port, 0);
        }
    }

    unsafe fn gpio() -> Self::Gpio {
        PortGpio::new(unsafe { Attiny167Ports::new() })
    }

    fn delay() -> Self::Delay {
        BusyWaitDelay::new()
    }

    unsafe fn init_console(config: SerialConfig) -> Result<Self::Console, SerialError> {
        let mut uart = unsafe { LinUart::new() };
        uart.configure(config)?;
        Ok(uart)
    }

    unsafe fn init_alarm_interrupt(gpio: &mut Self::Gpio) {
        unsafe { interrupt::enable_int1(gpio) }
    }

    fn clear_alarm_interrupt() {
        interrupt::clear_int1()
    }
}
