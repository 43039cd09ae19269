use log::trace;

use crate::twi::BitOrder;

/// Anything wired to a pair of bus lines.
pub trait WirePeer {
    /// Called whenever the level of either line changes.
    fn on_lines(&mut self, scl: bool, sda: bool);

    /// Whether the peer currently pulls SDA low.
    fn holds_sda(&self) -> bool;

    /// Whether the peer currently pulls SCL low (clock stretching).
    fn holds_scl(&self) -> bool {
        false
    }

    /// Called on every input register read of the master.
    fn poll(&mut self) {}
}

/// Byte-level behaviour of a simulated target chip.
pub trait TargetDevice {
    /// Start or repeated start seen.
    fn start(&mut self) {}

    /// Address byte received; return whether to acknowledge.
    fn address(&mut self, address: u8, read: bool) -> bool;

    /// Data byte received; return whether to acknowledge.
    fn write(&mut self, byte: u8) -> bool;

    /// Next byte to transmit.
    fn read(&mut self) -> u8;

    /// Master's response to a transmitted byte (`true` = ACK).
    fn master_ack(&mut self, _ack: bool) {}

    /// Stop seen.
    fn stop(&mut self) {}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    /// Not part of a transaction; only start/stop are noticed.
    Idle,
    Receive { byte: u8, count: u8, address: bool },
    /// Driving the acknowledgment bit for a received byte.
    AckOut { transmit: bool },
    Transmit { byte: u8, count: u8 },
    /// All 8 bits sent; SDA released for the master.
    AwaitAck,
    MasterAck(bool),
}

/// Bit-level target: turns line edges into [`TargetDevice`] calls.
///
/// Samples SDA on rising SCL and changes SDA only on falling SCL. After
/// each falling edge it may keep SCL low for a number of master polls.
pub struct WireTarget<T> {
    device: T,
    order: BitOrder,
    addressed: bool,
    stretch: usize,
    stretch_left: usize,
    phase: Phase,
    scl: bool,
    sda: bool,
    sda_low: bool,
}

impl<T: TargetDevice> WireTarget<T> {
    pub fn new(device: T, order: BitOrder, addressed: bool) -> Self {
        Self {
            device,
            order,
            addressed,
            stretch: 0,
            stretch_left: 0,
            phase: Phase::Idle,
            scl: true,
            sda: true,
            sda_low: false,
        }
    }

    /// Addressed, MSB first.
    pub fn i2c(device: T) -> Self {
        Self::new(device, BitOrder::MsbFirst, true)
    }

    /// Unaddressed, LSB first.
    pub fn tm1637(device: T) -> Self {
        Self::new(device, BitOrder::LsbFirst, false)
    }

    /// Hold SCL low for `polls` master reads after every falling edge.
    pub fn with_stretch(mut self, polls: usize) -> Self {
        self.stretch = polls;
        self
    }

    pub fn device(&self) -> &T {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut T {
        &mut self.device
    }

    fn drive_bit(&mut self, byte: u8, n: u8) {
        self.sda_low = byte & (1 << self.order.bit(n)) == 0;
    }

    fn load(&mut self) {
        let byte = self.device.read();
        self.drive_bit(byte, 0);
        self.phase = Phase::Transmit { byte, count: 1 };
    }

    fn rising(&mut self) {
        match self.phase {
            Phase::Receive {
                byte,
                count,
                address,
            } if count < 8 => {
                let bit = if self.sda { 1 << self.order.bit(count) } else { 0 };
                self.phase = Phase::Receive {
                    byte: byte | bit,
                    count: count + 1,
                    address,
                };
            }
            Phase::AwaitAck => self.phase = Phase::MasterAck(!self.sda),
            _ => {}
        }
    }

    fn falling(&mut self) {
        self.stretch_left = self.stretch;
        match self.phase {
            Phase::Receive {
                byte,
                count: 8,
                address,
            } => {
                let (ack, transmit) = if address {
                    let read = byte & 1 != 0;
                    (self.device.address(byte >> 1, read), read)
                } else {
                    (self.device.write(byte), false)
                };
                trace!("target got {:#04x}, ack {}", byte, ack);
                self.sda_low = ack;
                self.phase = if ack || !address {
                    Phase::AckOut { transmit }
                } else {
                    Phase::Idle
                };
            }
            Phase::AckOut { transmit } => {
                self.sda_low = false;
                if transmit {
                    self.load();
                } else {
                    self.phase = Phase::Receive {
                        byte: 0,
                        count: 0,
                        address: false,
                    };
                }
            }
            Phase::Transmit { count: 8, .. } => {
                self.sda_low = false;
                self.phase = Phase::AwaitAck;
            }
            Phase::Transmit { byte, count } => {
                self.drive_bit(byte, count);
                self.phase = Phase::Transmit {
                    byte,
                    count: count + 1,
                };
            }
            Phase::MasterAck(ack) => {
                self.device.master_ack(ack);
                if ack {
                    self.load();
                } else {
                    self.phase = Phase::Idle;
                }
            }
            _ => {}
        }
    }
}

impl<T: TargetDevice> WirePeer for WireTarget<T> {
    fn on_lines(&mut self, scl: bool, sda: bool) {
        let (was_scl, was_sda) = (self.scl, self.sda);
        self.scl = scl;
        self.sda = sda;

        if scl && was_scl && sda != was_sda {
            self.sda_low = false;
            self.stretch_left = 0;
            if sda {
                self.device.stop();
                self.phase = Phase::Idle;
            } else {
                self.device.start();
                self.phase = Phase::Receive {
                    byte: 0,
                    count: 0,
                    address: self.addressed,
                };
            }
        } else if scl && !was_scl {
            self.rising();
        } else if !scl && was_scl {
            self.falling();
        }
    }

    fn holds_sda(&self) -> bool {
        self.sda_low
    }

    fn holds_scl(&self) -> bool {
        self.stretch_left > 0
    }

    fn poll(&mut self) {
        self.stretch_left = self.stretch_left.saturating_sub(1);
    }
}
