use std::cell::Cell;
use std::rc::Rc;

use crate::hal::timer::Delay;

/// Delay that only counts.
///
/// Clones share the counter, so a test can keep a handle while the
/// driver owns the delay.
#[derive(Debug, Clone, Default)]
pub struct SimDelay {
    elapsed: Rc<Cell<u64>>,
}

impl SimDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed.get()
    }

    pub fn reset(&self) {
        self.elapsed.set(0);
    }
}

impl Delay for SimDelay {
    fn delay_us(&mut self, us: u32) {
        self.elapsed.set(self.elapsed.get() + u64::from(us));
    }
}
