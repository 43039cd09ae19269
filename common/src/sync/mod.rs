pub mod irq;
pub mod irq_spinlock;
pub use irq_spinlock::IrqSpinLock;
pub mod signal;
pub use signal::Signal;
