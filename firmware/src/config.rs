//! Board wiring and runtime defaults.

use drivers::hal::gpio::Pin;
use drivers::hal::serial::SerialConfig;
use drivers::twi::Lines;
use log::LevelFilter;

/// How the time is rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// 0 (dimmest) to 7.
    pub brightness: u8,
    pub colon: bool,
    /// Show leading zeros.
    pub pad: bool,
}

impl DisplaySettings {
    pub const DEFAULT: DisplaySettings = DisplaySettings {
        brightness: 4,
        colon: true,
        pad: false,
    };
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    /// DS3231 bus.
    pub rtc: Lines,
    /// TM1637 CLK/DIO.
    pub display: Lines,
    /// DS3231 INT/SQW, wired to INT1.
    pub rtc_int: Pin,
    /// Heartbeat LED.
    pub led: Pin,
    pub settings: DisplaySettings,
    pub poll_interval_ms: u32,
    pub console: SerialConfig,
    pub log_level: LevelFilter,
}

impl ClockConfig {
    pub const DEFAULT: ClockConfig = ClockConfig {
        rtc: Lines::new(18, 20),
        display: Lines::new(13, 14),
        rtc_int: Pin::new(4),
        led: Pin::new(9),
        settings: DisplaySettings::DEFAULT,
        poll_interval_ms: 1000,
        console: SerialConfig::new_8n1(9600),
        log_level: LevelFilter::Info,
    };
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
