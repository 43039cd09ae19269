//! Busy-wait delays calibrated to the CPU clock.
//!
//! The chip runs from the internal 8 MHz oscillator divided by 8. There is
//! no free-running microsecond counter to poll, so delays count loop
//! iterations instead.

use crate::hal::timer::Delay;

/// CPU clock in Hz.
pub const F_CPU: u32 = 1_000_000;

/// Approximate cycles spent per iteration of the wait loop.
const CYCLES_PER_LOOP: u32 = 4;

/// Cycle-counting delay.
#[derive(Debug, Default, Copy, Clone)]
pub struct BusyWaitDelay;

impl BusyWaitDelay {
    pub const fn new() -> Self {
        Self
    }

    const fn loops(us: u32) -> u32 {
        let cycles = us.saturating_mul(F_CPU / 1_000_000);
        let loops = cycles / CYCLES_PER_LOOP;
        if loops == 0 { 1 } else { loops }
    }
}

impl Delay for BusyWaitDelay {
    fn delay_us(&mut self, us: u32) {
        for i in 0..Self::loops(us) {
            // Keeps the optimiser from deleting the loop.
            core::hint::black_box(i);
        }
    }
}
