//! Simulated board for host-side testing.
//!
//! [`SimPorts`] stands in for the ATtiny167 port registers. Pins can be
//! wired to bus peers which see every edge on their lines and can pull
//! either line low, exactly like a real open-drain target. The bit-level
//! target logic lives in [`WireTarget`]; what the target *does* with the
//! bytes is up to a [`TargetDevice`] model.

mod board;
mod delay;
mod ds3231;
mod recorder;
mod target;
mod tm1637;

pub use board::SimPorts;
pub use delay::SimDelay;
pub use ds3231::Ds3231Model;
pub use recorder::{Recorder, Transaction};
pub use target::{TargetDevice, WirePeer, WireTarget};
pub use tm1637::Tm1637Model;

use crate::platform::attiny167::PortGpio;
use crate::twi::BusIo;

/// GPIO controller on the simulated board.
pub type SimGpio = PortGpio<SimPorts>;

/// Bus resources on the simulated board.
pub type SimIo = BusIo<SimGpio, SimDelay>;

impl SimPorts {
    pub fn gpio(&self) -> SimGpio {
        PortGpio::new(self.clone())
    }

    /// Bus resources with a fresh delay counter.
    pub fn bus_io(&self) -> SimIo {
        BusIo::new(self.gpio(), SimDelay::new())
    }
}
