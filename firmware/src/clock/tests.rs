use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use common::arch::CurrentIrq;
use drivers::peripheral::ds3231::registers::{self, bcd};
use drivers::peripheral::tm1637::encode_number;
use drivers::sim::{Ds3231Model, SimDelay, SimGpio, SimPorts, Tm1637Model, WireTarget};
use log::{Level, Log, Metadata, Record};

use super::*;
use crate::config::ClockConfig;

type Rtc = Rc<RefCell<WireTarget<Ds3231Model>>>;
type Display = Rc<RefCell<WireTarget<Tm1637Model>>>;

struct Bench {
    ports: SimPorts,
    rtc: Rtc,
    display: Display,
    ctx: ClockContext<SimGpio, SimDelay>,
}

fn bench() -> Bench {
    let config = ClockConfig::DEFAULT;
    let ports = SimPorts::new();
    let rtc = ports.attach(config.rtc, WireTarget::i2c(Ds3231Model::new()));
    let display = ports.attach(config.display, WireTarget::tm1637(Tm1637Model::new()));
    let ctx = ClockContext::new(ports.bus_io(), &config);
    Bench {
        ports,
        rtc,
        display,
        ctx,
    }
}

fn set_time(rtc: &Rtc, hour: u8, minute: u8, second: u8) {
    let mut rtc = rtc.borrow_mut();
    let chip = rtc.device_mut();
    chip.set_register(registers::SECONDS, bcd::encode(second));
    chip.set_register(registers::MINUTES, bcd::encode(minute));
    chip.set_register(registers::HOURS, bcd::encode(hour));
}

fn frames(display: &Display) -> usize {
    display.borrow().device().transactions().len()
}

fn shown(display: &Display) -> [u8; 4] {
    display.borrow().device().segments()
}

#[test]
fn init_greets_and_arms_alarm() {
    let mut b = bench();

    assert_eq!(init(&mut b.ctx), Ok(()));

    assert_eq!(shown(&b.display), [0x00, 0x76, 0x04, 0x00]);
    assert_eq!(b.display.borrow().device().brightness(), 1);
    let rtc = b.rtc.borrow();
    assert_eq!(rtc.device().register(registers::CONTROL), 0x05);
    assert_eq!(rtc.device().register(registers::ALARM1_SECONDS), 0x00);
    assert_eq!(b.ports.contention(), 0);
}

#[test]
fn refresh_redraws_only_when_the_minute_changes() {
    let mut b = bench();

    set_time(&b.rtc, 12, 34, 56);
    assert_eq!(refresh(&mut b.ctx, false), Ok(Time::new(12, 34, 56)));
    assert_eq!(shown(&b.display), encode_number(1234, true, false));
    assert_eq!(frames(&b.display), 3);

    set_time(&b.rtc, 12, 34, 59);
    refresh(&mut b.ctx, false).unwrap();
    assert_eq!(frames(&b.display), 3);

    set_time(&b.rtc, 12, 35, 0);
    refresh(&mut b.ctx, false).unwrap();
    assert_eq!(frames(&b.display), 6);
    assert_eq!(shown(&b.display), encode_number(1235, true, false));
    assert_eq!(b.ctx.shown, Some((12, 35)));
}

#[test]
fn forced_refresh_always_redraws() {
    let mut b = bench();
    set_time(&b.rtc, 8, 0, 0);

    refresh(&mut b.ctx, true).unwrap();
    refresh(&mut b.ctx, true).unwrap();

    assert_eq!(frames(&b.display), 6);
}

#[test]
fn just_after_midnight_hides_leading_zeros() {
    let mut b = bench();
    set_time(&b.rtc, 0, 7, 0);

    refresh(&mut b.ctx, false).unwrap();

    // colon stays lit on the blanked digit
    assert_eq!(shown(&b.display), [0x00, 0x80, 0x00, 0x07]);
}

#[test]
fn alarm_is_acknowledged_and_redrawn() {
    let mut b = bench();
    set_time(&b.rtc, 23, 59, 0);
    refresh(&mut b.ctx, false).unwrap();
    b.rtc.borrow_mut().device_mut().fire_alarm();

    assert_eq!(on_alarm(&mut b.ctx), Ok(Time::new(23, 59, 0)));

    assert_eq!(b.rtc.borrow().device().register(registers::STATUS) & 0x01, 0);
    assert_eq!(frames(&b.display), 6);
}

#[test]
fn run_once_consumes_the_alarm() {
    let b = bench();
    set_time(&b.rtc, 6, 30, 0);
    b.rtc.borrow_mut().device_mut().fire_alarm();
    let clock = IrqSpinLock::<_, CurrentIrq>::new(b.ctx);
    let alarm = Signal::new();
    alarm.raise();
    alarm.raise();

    assert_eq!(run_once(&clock, &alarm), Ok(Time::new(6, 30, 0)));

    assert!(!alarm.is_pending());
    assert_eq!(alarm.take_overruns(), 0);
    assert!(!clock.is_locked());
    assert_eq!(b.rtc.borrow().device().register(registers::STATUS) & 0x01, 0);
    assert_eq!(shown(&b.display), encode_number(630, true, false));
}

#[test]
fn missing_rtc_leaves_the_display_alone() {
    let config = ClockConfig::DEFAULT;
    let ports = SimPorts::new();
    ports.pull_up(config.rtc);
    let display = ports.attach(config.display, WireTarget::tm1637(Tm1637Model::new()));
    let clock = IrqSpinLock::<_, CurrentIrq>::new(ClockContext::new(ports.bus_io(), &config));
    let alarm = Signal::new();

    assert_eq!(run_once(&clock, &alarm), Err(RtcError::AddressNack));
    alarm.raise();
    assert_eq!(run_once(&clock, &alarm), Err(RtcError::AddressNack));

    assert!(!clock.is_locked());
    assert_eq!(frames(&display), 0);
    assert_eq!(ports.contention(), 0);
}

std::thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps each test thread's records from `clock` apart.
struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.module_path() == Some(module_path!().trim_end_matches("::tests")) {
            CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
        }
    }

    fn flush(&self) {}
}

fn capture() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = log::set_logger(&Capture);
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

fn captured(level: Level) -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}

#[test]
fn failed_pass_is_logged_once() {
    capture();
    let config = ClockConfig::DEFAULT;
    let ports = SimPorts::new();
    ports.pull_up(config.rtc);
    let _display = ports.attach(config.display, WireTarget::tm1637(Tm1637Model::new()));
    let clock = IrqSpinLock::<_, CurrentIrq>::new(ClockContext::new(ports.bus_io(), &config));

    assert!(run_once(&clock, &Signal::new()).is_err());

    let errors = captured(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("clock update failed"));
    assert!(captured(Level::Warn).is_empty());
}
