use common::sync::Signal;

/// Raised by the RTC alarm (INT1, falling edge).
pub static ALARM: Signal = Signal::new();

/// INT1 handler body.
pub fn rtc_alarm() {
    ALARM.raise();
}
