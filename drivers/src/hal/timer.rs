//! Timing Hardware Abstraction Layer.
//!
//! The bus engine needs nothing more than a blocking microsecond wait.
//! Keeping it behind a trait lets tests run the bit-level state machine
//! without waiting in real time.

/// Blocking delay provider.
pub trait Delay {
    /// Busy-wait for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Busy-wait delay for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
