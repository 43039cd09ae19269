//! Clock task: keep the display in step with the RTC.
//!
//! The RTC raises its alarm at second 0 of every minute, so the display
//! normally changes from [`on_alarm`]. [`refresh`] also runs on every
//! loop pass and catches up if an alarm was missed.

use common::sync::irq::IrqControl;
use common::sync::{IrqSpinLock, Signal};
use drivers::hal::gpio::GpioController;
use drivers::hal::timer::Delay;
use drivers::peripheral::ds3231::{RtcError, Time};
use log::{error, info, warn};

use crate::context::ClockContext;

/// Startup: greet on the display, then set the RTC up to interrupt once
/// a minute.
pub fn init<G: GpioController, D: Delay>(ctx: &mut ClockContext<G, D>) -> Result<(), RtcError> {
    ctx.display.init(&mut ctx.io);
    ctx.rtc.init(&mut ctx.io)?;
    ctx.rtc.arm_alarm(&mut ctx.io)?;
    Ok(())
}

/// Read the time and show `hhmm` if the minute changed (or `force`).
pub fn refresh<G: GpioController, D: Delay>(
    ctx: &mut ClockContext<G, D>,
    force: bool,
) -> Result<Time, RtcError> {
    let time = ctx.rtc.read_time(&mut ctx.io)?;
    let minute = (time.hour, time.minute);

    if force || ctx.shown != Some(minute) {
        let settings = ctx.settings;
        let hhmm = u16::from(time.hour) * 100 + u16::from(time.minute);
        ctx.display.show_number(
            &mut ctx.io,
            hhmm,
            settings.colon,
            settings.pad,
            settings.brightness,
        );
        ctx.shown = Some(minute);
        info!("time {}", time);
    }

    Ok(time)
}

/// RTC alarm fired: release the INT line and redraw.
pub fn on_alarm<G: GpioController, D: Delay>(
    ctx: &mut ClockContext<G, D>,
) -> Result<Time, RtcError> {
    ctx.rtc.ack_alarm(&mut ctx.io)?;
    match ctx.rtc.read_temperature(&mut ctx.io) {
        Ok(temp) => info!("temperature {} C", temp),
        Err(e) => warn!("temperature: {}", e),
    }
    refresh(ctx, true)
}

/// One pass of the main loop.
///
/// Consumes a pending alarm, then talks to the chips with the context
/// locked, i.e. with interrupts masked for the whole exchange. Errors are
/// logged and returned; the caller just keeps looping.
pub fn run_once<G, D, I>(
    clock: &IrqSpinLock<ClockContext<G, D>, I>,
    alarm: &Signal,
) -> Result<Time, RtcError>
where
    G: GpioController,
    D: Delay,
    I: IrqControl,
{
    let fired = alarm.take();
    let missed = alarm.take_overruns();
    if missed > 0 {
        warn!("{} alarm(s) merged", missed);
    }

    let mut ctx = clock.lock();
    let result = if fired {
        on_alarm(&mut *ctx)
    } else {
        refresh(&mut *ctx, false)
    };

    if let Err(e) = result {
        error!("clock update failed: {}", e);
    }
    result
}

#[cfg(test)]
mod tests;
