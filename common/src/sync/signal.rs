use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use super::irq::IrqControl;
use crate::arch::CurrentIrq;

/// Single-consumer event signal.
///
/// Interrupt handlers `raise()` it; the main loop `take()`s it. Raising an
/// already pending signal coalesces into one event, but the number of
/// coalesced raises is kept so the consumer can tell it fell behind.
///
/// Only atomic loads and stores are used, each read-modify-write inside a
/// masked section, so it works on cores without compare-and-swap.
pub struct Signal {
    pending: AtomicBool,
    overruns: AtomicU8,
}

fn masked<R>(f: impl FnOnce() -> R) -> R {
    let state = CurrentIrq::disable();
    let result = f();
    CurrentIrq::restore(state);
    result
}

impl Signal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            overruns: AtomicU8::new(0),
        }
    }

    /// Mark the event as pending. Safe from interrupt context.
    pub fn raise(&self) {
        masked(|| {
            if self.pending.load(Ordering::Acquire) {
                // Saturate rather than wrap.
                let n = self.overruns.load(Ordering::Relaxed);
                self.overruns.store(n.saturating_add(1), Ordering::Relaxed);
            } else {
                self.pending.store(true, Ordering::Release);
            }
        })
    }

    /// Consume the pending event, if any.
    pub fn take(&self) -> bool {
        masked(|| {
            let pending = self.pending.load(Ordering::Acquire);
            if pending {
                self.pending.store(false, Ordering::Release);
            }
            pending
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Raises that were merged into an already pending event since the last
    /// call.
    pub fn take_overruns(&self) -> u8 {
        masked(|| {
            let n = self.overruns.load(Ordering::Relaxed);
            self.overruns.store(0, Ordering::Relaxed);
            n
        })
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}
