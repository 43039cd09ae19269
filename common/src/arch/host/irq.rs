use core::sync::atomic::{AtomicBool, Ordering};

use crate::sync::irq::IrqControl;

/// Emulated global interrupt enable flag.
static ENABLED: AtomicBool = AtomicBool::new(false);

/// Interrupt control for hosted builds (simulation and unit tests).
///
/// There are no interrupts to mask; the flag only records what the
/// hardware would see so critical sections can be observed.
pub struct HostIrq;

impl HostIrq {
    /// Whether "interrupts" are currently enabled.
    pub fn enabled() -> bool {
        ENABLED.load(Ordering::Acquire)
    }
}

impl IrqControl for HostIrq {
    type State = bool;

    fn disable() -> bool {
        ENABLED.swap(false, Ordering::AcqRel)
    }

    fn restore(prev_enabled: bool) {
        if prev_enabled {
            ENABLED.store(true, Ordering::Release);
        }
    }

    unsafe fn enable() {
        ENABLED.store(true, Ordering::Release);
    }
}
