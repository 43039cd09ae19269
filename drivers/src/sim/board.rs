use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use super::target::WirePeer;
use crate::hal::gpio::Pin;
use crate::platform::attiny167::pins;
use crate::platform::attiny167::{Port, PortReg, PortRegisters};
use crate::twi::Lines;

/// Upper bound on peer reaction rounds after a single register access.
const SETTLE_ROUNDS: usize = 16;

struct Bus {
    lines: Lines,
    peer: Rc<RefCell<dyn WirePeer>>,
    /// Levels last reported to the peer.
    seen: (bool, bool),
}

#[derive(Default)]
struct Board {
    ddr: [u8; 2],
    port: [u8; 2],
    buses: Vec<Bus>,
    /// Lines with a board pull-up but nothing attached.
    pulled: Vec<Pin>,
    contention: usize,
    polls: usize,
}

impl Board {
    fn on_bus(&self, pin: Pin) -> bool {
        self.pulled.contains(&pin)
            || self
                .buses
                .iter()
                .any(|bus| bus.lines.scl == pin || bus.lines.sda == pin)
    }

    fn master(&self, pin: Pin) -> Option<(bool, bool)> {
        let (port, mask) = pins::locate(pin)?;
        let i = port as usize;
        Some((self.ddr[i] & mask != 0, self.port[i] & mask != 0))
    }

    /// Wired-AND level of a bus line: the pull-up wins unless someone pulls.
    fn line_level(&self, pin: Pin) -> bool {
        let master_low = matches!(self.master(pin), Some((true, false)));
        let peer_low = self.buses.iter().any(|bus| {
            let peer = bus.peer.borrow();
            (bus.lines.scl == pin && peer.holds_scl()) || (bus.lines.sda == pin && peer.holds_sda())
        });
        !(master_low || peer_low)
    }

    fn pin_register(&self, port: Port) -> u8 {
        let i = port as usize;
        (0..8u8).fold(0, |acc, bit| {
            let level = match self.pin_at(port, bit) {
                Some(pin) if self.on_bus(pin) => self.line_level(pin),
                // Outputs read their latch, inputs read the pull-up enable.
                _ => self.port[i] & (1 << bit) != 0,
            };
            acc | (u8::from(level) << bit)
        })
    }

    fn pin_at(&self, port: Port, bit: u8) -> Option<Pin> {
        (1..=pins::PIN_COUNT)
            .map(Pin::new)
            .find(|&pin| pins::locate(pin) == Some((port, 1 << bit)))
    }

    fn check_contention(&mut self) {
        let lines = self
            .buses
            .iter()
            .flat_map(|bus| [bus.lines.scl, bus.lines.sda])
            .chain(self.pulled.iter().copied());
        let driven_high = lines
            .filter(|&line| self.master(line) == Some((true, true)))
            .inspect(|line| trace!("{} driven high on a shared line", line))
            .count();
        self.contention += driven_high;
    }

    /// Report level changes to peers until nobody reacts any more.
    fn settle(&mut self) {
        for _ in 0..SETTLE_ROUNDS {
            let mut changed = false;
            for i in 0..self.buses.len() {
                let Lines { scl, sda } = self.buses[i].lines;
                let levels = (self.line_level(scl), self.line_level(sda));
                if levels != self.buses[i].seen {
                    self.buses[i].seen = levels;
                    self.buses[i].peer.borrow_mut().on_lines(levels.0, levels.1);
                    changed = true;
                }
            }
            if !changed {
                return;
            }
        }
    }

    fn poll(&mut self) {
        self.polls += 1;
        for bus in &self.buses {
            bus.peer.borrow_mut().poll();
        }
        self.settle();
    }
}

/// Simulated port registers with bus peers attached.
///
/// Cheap to clone; clones share the same board.
#[derive(Clone, Default)]
pub struct SimPorts {
    board: Rc<RefCell<Board>>,
}

impl SimPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire `peer` to `lines` and return a handle for inspecting it later.
    pub fn attach<P: WirePeer + 'static>(&self, lines: Lines, peer: P) -> Rc<RefCell<P>> {
        let peer = Rc::new(RefCell::new(peer));
        let mut board = self.board.borrow_mut();
        board.buses.push(Bus {
            lines,
            peer: peer.clone(),
            seen: (true, true),
        });
        board.settle();
        peer
    }

    /// Fit pull-ups to `lines` without attaching anything, as on a board
    /// whose chip is missing. Attached lines are always pulled up.
    pub fn pull_up(&self, lines: Lines) {
        let mut board = self.board.borrow_mut();
        for line in [lines.scl, lines.sda] {
            if !board.pulled.contains(&line) {
                board.pulled.push(line);
            }
        }
    }

    /// Number of times a bus line was found driven output-high.
    pub fn contention(&self) -> usize {
        self.board.borrow().contention
    }

    /// Number of input register reads so far.
    pub fn polls(&self) -> usize {
        self.board.borrow().polls
    }

    /// Current level of a pin as the chip would read it.
    pub fn level(&self, pin: Pin) -> bool {
        let mut board = self.board.borrow_mut();
        board.settle();
        match pins::locate(pin) {
            Some(_) if board.on_bus(pin) => board.line_level(pin),
            Some((port, mask)) => board.port[port as usize] & mask != 0,
            None => false,
        }
    }
}

impl PortRegisters for SimPorts {
    fn read(&self, port: Port, reg: PortReg) -> u8 {
        let mut board = self.board.borrow_mut();
        let i = port as usize;
        match reg {
            PortReg::Ddr => board.ddr[i],
            PortReg::Port => board.port[i],
            PortReg::Pin => {
                board.poll();
                board.pin_register(port)
            }
        }
    }

    fn write(&mut self, port: Port, reg: PortReg, value: u8) {
        let mut board = self.board.borrow_mut();
        let i = port as usize;
        match reg {
            PortReg::Ddr => board.ddr[i] = value,
            PortReg::Port => board.port[i] = value,
            // Writing ones to PINx toggles the latch.
            PortReg::Pin => board.port[i] ^= value,
        }
        board.check_contention();
        board.settle();
    }
}
