use std::collections::VecDeque;

use super::target::TargetDevice;

/// Bytes seen between one start condition and the next start or stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Address and direction, for addressed buses.
    pub address: Option<(u8, bool)>,
    /// Bytes written by the master.
    pub bytes: Vec<u8>,
}

/// Generic target that records everything and answers from a queue.
#[derive(Debug, Default)]
pub struct Recorder {
    address: Option<u8>,
    nack_after: Option<usize>,
    read_data: VecDeque<u8>,
    transactions: Vec<Transaction>,
    master_acks: Vec<bool>,
    stops: usize,
}

impl Recorder {
    /// Acknowledges everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledges only `address`.
    pub fn at(address: u8) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    /// Stop acknowledging data after `count` bytes in a transaction.
    pub fn nack_after(mut self, count: usize) -> Self {
        self.nack_after = Some(count);
        self
    }

    /// Bytes returned by subsequent reads; `0xFF` once exhausted.
    pub fn respond_with(mut self, data: &[u8]) -> Self {
        self.read_data.extend(data);
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn master_acks(&self) -> &[bool] {
        &self.master_acks
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    fn current(&mut self) -> &mut Transaction {
        if self.transactions.is_empty() {
            self.transactions.push(Transaction::default());
        }
        let last = self.transactions.len() - 1;
        &mut self.transactions[last]
    }
}

impl TargetDevice for Recorder {
    fn start(&mut self) {
        self.transactions.push(Transaction::default());
    }

    fn address(&mut self, address: u8, read: bool) -> bool {
        self.current().address = Some((address, read));
        self.address.is_none_or(|own| own == address)
    }

    fn write(&mut self, byte: u8) -> bool {
        let limit = self.nack_after;
        let tx = self.current();
        tx.bytes.push(byte);
        limit.is_none_or(|limit| tx.bytes.len() <= limit)
    }

    fn read(&mut self) -> u8 {
        self.read_data.pop_front().unwrap_or(0xFF)
    }

    fn master_ack(&mut self, ack: bool) {
        self.master_acks.push(ack);
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}
