use drivers::peripheral::ds3231::Ds3231;
use drivers::peripheral::tm1637::Tm1637;
use drivers::twi::BusIo;

use crate::config::{ClockConfig, DisplaySettings};

/// Everything the clock task needs, owned in one place.
///
/// Holding a `&mut ClockContext` is holding the bus: both chips are
/// reached through `io`.
pub struct ClockContext<G, D> {
    pub io: BusIo<G, D>,
    pub rtc: Ds3231,
    pub display: Tm1637,
    pub settings: DisplaySettings,
    /// `(hour, minute)` currently on the display.
    pub shown: Option<(u8, u8)>,
}

impl<G, D> ClockContext<G, D> {
    pub fn new(io: BusIo<G, D>, config: &ClockConfig) -> Self {
        Self {
            io,
            rtc: Ds3231::new(config.rtc),
            display: Tm1637::new(config.display),
            settings: config.settings,
            shown: None,
        }
    }
}
