//! `log` backend on the console UART.
//!
//! Each record goes out as one line, `LEVEL target: message\r\n`. The
//! port sits behind an [`IrqSpinLock`], so a line is never interleaved
//! with another.

use core::fmt::Write;

use common::arch::CurrentIrq;
use common::sync::IrqSpinLock;
use drivers::hal::serial::{SerialPort, SerialWriter};
use log::{LevelFilter, Log, Metadata, Record};

pub struct SerialLogger<S> {
    port: IrqSpinLock<S, CurrentIrq>,
    level: LevelFilter,
}

impl<S: SerialPort> SerialLogger<S> {
    pub const fn new(port: S, level: LevelFilter) -> Self {
        Self {
            port: IrqSpinLock::new(port),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn into_port(self) -> S {
        self.port.into_inner()
    }
}

impl<S: SerialPort + Send> Log for SerialLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut port = self.port.lock();
        // Nowhere to report a failing console.
        let _ = writeln!(
            SerialWriter(&mut *port),
            "{} {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = self.port.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivers::hal::serial::{SerialConfig, SerialError};
    use log::Level;

    #[derive(Default)]
    struct Capture {
        bytes: Vec<u8>,
        flushes: usize,
    }

    impl SerialPort for Capture {
        fn configure(&mut self, _config: SerialConfig) -> Result<(), SerialError> {
            Ok(())
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
            self.bytes.push(byte);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), SerialError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn record_becomes_one_crlf_line() {
        let logger = SerialLogger::new(Capture::default(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("drivers::twi")
                .args(format_args!("no ack for byte {:#04x}", 0x12))
                .build(),
        );

        let port = logger.into_port();
        assert_eq!(port.bytes, b"WARN drivers::twi: no ack for byte 0x12\r\n");
    }

    #[test]
    fn records_below_the_level_are_dropped() {
        let logger = SerialLogger::new(Capture::default(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("drivers::peripheral::ds3231")
                .args(format_args!("rtc write"))
                .build(),
        );
        assert!(!logger.enabled(&Metadata::builder().level(Level::Trace).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));

        assert!(logger.into_port().bytes.is_empty());
    }

    #[test]
    fn flush_reaches_the_port() {
        let logger = SerialLogger::new(Capture::default(), LevelFilter::Off);
        logger.flush();
        assert_eq!(logger.into_port().flushes, 1);
    }
}
