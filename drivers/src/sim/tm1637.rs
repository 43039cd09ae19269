use super::target::TargetDevice;

const RAM_SIZE: usize = 6;

/// TM1637 command decoder.
///
/// Keeps the display RAM and control state the commands would produce
/// and a copy of every transaction's raw bytes.
#[derive(Debug, Clone, Default)]
pub struct Tm1637Model {
    ram: [u8; RAM_SIZE],
    brightness: u8,
    on: bool,
    fixed_address: bool,
    /// Write position during an address command, `None` otherwise.
    cursor: Option<usize>,
    transactions: Vec<Vec<u8>>,
}

impl Tm1637Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// First four RAM positions, i.e. the digits of a 4-digit module.
    pub fn segments(&self) -> [u8; 4] {
        [self.ram[0], self.ram[1], self.ram[2], self.ram[3]]
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn transactions(&self) -> &[Vec<u8>] {
        &self.transactions
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }
}

impl TargetDevice for Tm1637Model {
    fn start(&mut self) {
        self.transactions.push(Vec::new());
        self.cursor = None;
    }

    fn address(&mut self, _address: u8, _read: bool) -> bool {
        true
    }

    fn write(&mut self, byte: u8) -> bool {
        let first = match self.transactions.last_mut() {
            Some(tx) => {
                tx.push(byte);
                tx.len() == 1
            }
            None => false,
        };

        if let (false, Some(pos)) = (first, self.cursor) {
            self.ram[pos % RAM_SIZE] = byte;
            if !self.fixed_address {
                self.cursor = Some(pos + 1);
            }
            return true;
        }

        match byte & 0xC0 {
            0x40 => self.fixed_address = byte & 0x04 != 0,
            0xC0 => self.cursor = Some(usize::from(byte & 0x0F)),
            0x80 => {
                self.on = byte & 0x08 != 0;
                self.brightness = byte & 0x07;
            }
            _ => {}
        }
        true
    }

    fn read(&mut self) -> u8 {
        // Key scan: no key pressed.
        0xFF
    }
}
