use super::target::TargetDevice;
use crate::peripheral::ds3231::registers::{ADDRESS, Status};

const REGISTER_COUNT: usize = 0x13;

/// DS3231 register file behind the bus.
///
/// The first byte written after the address sets the register pointer;
/// further writes and all reads auto-increment it, wrapping at the end of
/// the register file.
#[derive(Debug, Clone)]
pub struct Ds3231Model {
    regs: [u8; REGISTER_COUNT],
    pointer: usize,
    expect_pointer: bool,
}

impl Default for Ds3231Model {
    fn default() -> Self {
        let mut regs = [0u8; REGISTER_COUNT];
        // Power-on values: INTCN and RS2/RS1 set, OSF set.
        regs[0x0E] = 0x1C;
        regs[0x0F] = 0x88;
        Self {
            regs,
            pointer: 0,
            expect_pointer: false,
        }
    }
}

impl Ds3231Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, reg: u8) -> u8 {
        self.regs[usize::from(reg) % REGISTER_COUNT]
    }

    pub fn set_register(&mut self, reg: u8, value: u8) {
        self.regs[usize::from(reg) % REGISTER_COUNT] = value;
    }

    /// Alarm 1 matched: raise its flag.
    pub fn fire_alarm(&mut self) {
        self.regs[0x0F] |= Status::A1F.bits();
    }

    fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
    }
}

impl TargetDevice for Ds3231Model {
    fn address(&mut self, address: u8, read: bool) -> bool {
        self.expect_pointer = !read;
        address == ADDRESS
    }

    fn write(&mut self, byte: u8) -> bool {
        if self.expect_pointer {
            self.pointer = usize::from(byte) % REGISTER_COUNT;
            self.expect_pointer = false;
        } else {
            self.regs[self.pointer] = byte;
            self.advance();
        }
        true
    }

    fn read(&mut self) -> u8 {
        let byte = self.regs[self.pointer];
        self.advance();
        byte
    }
}
