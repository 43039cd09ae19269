#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use core::panic::PanicInfo;

use common::arch::CurrentIrq;
use common::sync::IrqSpinLock;
use common::sync::irq::IrqControl;
use drivers::hal::gpio::{GpioController, PinMode};
use drivers::hal::timer::Delay;
use drivers::platform::{CurrentPlatform, Platform};
use drivers::twi::BusIo;
use firmware::irq::handlers;
use firmware::logger::SerialLogger;
use firmware::{ClockConfig, ClockContext, clock};
use log::{error, info};
use spin::Once;

type Console = <CurrentPlatform as Platform>::Console;

// `portable-atomic` backs this on AVR, which has no compare-and-swap.
static LOGGER: Once<SerialLogger<Console>> = Once::new();

#[unsafe(no_mangle)]
pub extern "C" fn main() -> ! {
    let config = ClockConfig::DEFAULT;

    // SAFETY: first code after reset, nothing else owns the ports yet.
    let mut gpio = unsafe {
        CurrentPlatform::early_init();
        CurrentPlatform::gpio()
    };
    gpio.set_mode(config.led, PinMode::Output);

    // SAFETY: single call, interrupts still disabled.
    if let Ok(console) = unsafe { CurrentPlatform::init_console(config.console) } {
        let logger = LOGGER.call_once(|| SerialLogger::new(console, config.log_level));
        // SAFETY: interrupts still disabled, nothing logs concurrently.
        unsafe {
            let _ = log::set_logger_racy(logger);
            log::set_max_level_racy(config.log_level);
        }
    }
    info!("*** Simpleclock initialized on {}", CurrentPlatform::name());

    // SAFETY: __vector_2 below handles INT1.
    unsafe { CurrentPlatform::init_alarm_interrupt(&mut gpio) };
    CurrentPlatform::clear_alarm_interrupt();

    let io = BusIo::new(gpio, CurrentPlatform::delay());
    let clock = IrqSpinLock::<_, CurrentIrq>::new(ClockContext::new(io, &config));

    let init = clock::init(&mut *clock.lock());
    if let Err(e) = init {
        error!("rtc setup failed: {}", e);
    }

    // SAFETY: the only handler just raises a signal.
    unsafe { CurrentIrq::enable() };

    let mut delay = CurrentPlatform::delay();
    loop {
        clock.lock().io.gpio.toggle(config.led);
        delay.delay_ms(config.poll_interval_ms);

        // Errors are logged inside; the next pass retries.
        let _ = clock::run_once(&clock, &handlers::ALARM);
    }
}

/// INT1: DS3231 alarm output.
#[unsafe(no_mangle)]
pub unsafe extern "avr-interrupt" fn __vector_2() {
    handlers::rtc_alarm();
}

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}
