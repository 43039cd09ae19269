use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::sim::{Recorder, SimIo, SimPorts, Transaction, WireTarget};

const LINES: Lines = Lines::new(18, 20);

type Peer = Rc<RefCell<WireTarget<Recorder>>>;

fn board(target: WireTarget<Recorder>) -> (SimPorts, SimIo, Peer) {
    let ports = SimPorts::new();
    let peer = ports.attach(LINES, target);
    let io = ports.bus_io();
    (ports, io, peer)
}

fn config(order: BitOrder) -> TwiConfig {
    TwiConfig::new(order, Timing::STANDARD)
}

#[test]
fn bit_order_positions() {
    assert_eq!(BitOrder::MsbFirst.bit(0), 7);
    assert_eq!(BitOrder::MsbFirst.bit(7), 0);
    assert_eq!(BitOrder::LsbFirst.bit(0), 0);
    assert_eq!(BitOrder::LsbFirst.bit(7), 7);
}

#[test]
fn addressed_write_walks_the_states() {
    let (ports, mut io, peer) = board(WireTarget::i2c(Recorder::at(0x68)));
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);
    assert_eq!(bus.state(), BusState::Idle);

    bus.init();
    assert!(bus.start(Some(0x68), false));
    assert_eq!(bus.state(), BusState::Addressed);
    assert!(bus.write(0x0E));
    assert!(bus.write(0x04));
    assert_eq!(bus.state(), BusState::Transfer);
    bus.stop();
    assert_eq!(bus.state(), BusState::Stopped);

    let peer = peer.borrow();
    assert_eq!(
        peer.device().transactions(),
        [Transaction {
            address: Some((0x68, false)),
            bytes: vec![0x0E, 0x04],
        }]
    );
    assert_eq!(peer.device().stops(), 1);
    assert_eq!(ports.contention(), 0);
}

#[test]
fn address_nack_leaves_no_data() {
    let (ports, mut io, peer) = board(WireTarget::i2c(Recorder::at(0x50)));
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);

    assert!(!bus.start(Some(0x68), false));
    assert_eq!(bus.state(), BusState::Started);
    bus.stop();

    let peer = peer.borrow();
    let tx = &peer.device().transactions()[0];
    assert_eq!(tx.address, Some((0x68, false)));
    assert!(tx.bytes.is_empty());
    assert_eq!(ports.contention(), 0);
}

#[test]
fn unaddressed_start_always_succeeds() {
    let (_ports, mut io, _peer) = board(WireTarget::tm1637(Recorder::at(0x50)));
    let mut bus = TwoWire::new(&mut io, LINES, config(BitOrder::LsbFirst));

    assert!(bus.start(None, false));
    assert_eq!(bus.state(), BusState::Started);
}

#[test]
fn data_nack_is_reported_and_transfer_continues() {
    let (_ports, mut io, peer) = board(WireTarget::i2c(Recorder::new().nack_after(1)));
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);

    assert!(bus.start(Some(0x20), false));
    assert!(bus.write(0x01));
    assert!(!bus.write(0x02));
    assert!(!bus.write(0x03));
    bus.stop();

    assert_eq!(peer.borrow().device().transactions()[0].bytes, [0x01, 0x02, 0x03]);
}

#[test]
fn repeated_start_read() {
    let target = WireTarget::i2c(Recorder::new().respond_with(&[0xA5, 0x3C, 0x77]));
    let (ports, mut io, peer) = board(target);
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);

    assert!(bus.start(Some(0x42), false));
    assert!(bus.write(0x10));
    assert!(bus.start(Some(0x42), true));
    assert_eq!(bus.read(false), 0xA5);
    assert_eq!(bus.read(false), 0x3C);
    assert_eq!(bus.read(true), 0x77);
    bus.stop();

    let peer = peer.borrow();
    let device = peer.device();
    assert_eq!(device.transactions().len(), 2);
    assert_eq!(device.transactions()[0].bytes, [0x10]);
    assert_eq!(device.transactions()[1].address, Some((0x42, true)));
    assert_eq!(device.master_acks(), [true, true, false]);
    assert_eq!(device.stops(), 1);
    assert_eq!(ports.contention(), 0);
}

#[test]
fn waits_for_a_stretched_clock() {
    let (plain_ports, mut plain_io, _) = board(WireTarget::i2c(Recorder::new()));
    let (slow_ports, mut slow_io, slow) = board(WireTarget::i2c(Recorder::new()).with_stretch(3));

    for io in [&mut plain_io, &mut slow_io] {
        let mut bus = TwoWire::new(io, LINES, TwiConfig::STANDARD);
        assert!(bus.start(Some(0x11), false));
        assert!(bus.write(0x5A));
        bus.stop();
    }

    assert_eq!(slow.borrow().device().transactions()[0].bytes, [0x5A]);
    // the master polls twice more per stretched clock
    assert!(slow_ports.polls() >= plain_ports.polls() + 2 * 9 * 2);
    assert_eq!(slow_ports.contention(), 0);
}

#[test]
fn standard_mode_timing() {
    let (_ports, mut io, _peer) = board(WireTarget::i2c(Recorder::new()));
    let delay = io.delay.clone();
    let Timing { low_us, high_us } = Timing::STANDARD;

    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);
    bus.start(None, false);
    bus.write(0xFF);
    bus.stop();

    let start = 2 * low_us + high_us;
    let byte = 9 * (low_us + high_us);
    let stop = 2 * low_us + high_us;
    assert_eq!(delay.elapsed_us(), u64::from(start + byte + stop));
}

#[test]
fn init_releases_both_lines() {
    let (ports, mut io, _peer) = board(WireTarget::i2c(Recorder::new()));
    io.gpio.set_high(LINES.scl);
    io.gpio.set_mode(LINES.sda, PinMode::Output);

    TwoWire::new(&mut io, LINES, TwiConfig::STANDARD).init();

    assert!(ports.level(LINES.scl));
    assert!(ports.level(LINES.sda));
    assert_eq!(ports.contention(), 0);
}

#[test]
fn empty_pulled_up_bus_nacks() {
    let ports = SimPorts::new();
    ports.pull_up(LINES);
    let mut io = ports.bus_io();
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);

    bus.init();
    assert!(!bus.start(Some(0x68), false));
    bus.stop();
    assert_eq!(bus.state(), BusState::Stopped);
    assert!(ports.level(LINES.scl));
    assert!(ports.level(LINES.sda));
    assert_eq!(ports.contention(), 0);
}

#[test]
fn invalid_lines_do_not_hang() {
    let ports = SimPorts::new();
    let mut io = ports.bus_io();
    let mut bus = TwoWire::new(&mut io, Lines::new(5, 6), TwiConfig::STANDARD);

    bus.init();
    assert!(!bus.start(Some(0x68), false));
    assert!(!bus.write(0x00));
    assert_eq!(bus.read(true), 0x00);
    bus.stop();
}

#[test]
fn byte_outside_transaction_is_still_sent() {
    let (_ports, mut io, _peer) = board(WireTarget::i2c(Recorder::new()));
    let mut bus = TwoWire::new(&mut io, LINES, TwiConfig::STANDARD);

    bus.write(0x00);
    assert_eq!(bus.state(), BusState::Transfer);
}

proptest! {
    #[test]
    fn target_sees_the_written_byte(byte: u8, lsb_first: bool) {
        let order = if lsb_first { BitOrder::LsbFirst } else { BitOrder::MsbFirst };
        let (ports, mut io, peer) = board(WireTarget::new(Recorder::new(), order, false));
        let mut bus = TwoWire::new(&mut io, LINES, config(order));

        prop_assert!(bus.start(None, false));
        prop_assert!(bus.write(byte));
        bus.stop();

        let peer = peer.borrow();
        prop_assert_eq!(&peer.device().transactions()[0].bytes, &vec![byte]);
        prop_assert_eq!(ports.contention(), 0);
    }

    #[test]
    fn master_reads_the_target_byte(byte: u8, lsb_first: bool) {
        let order = if lsb_first { BitOrder::LsbFirst } else { BitOrder::MsbFirst };
        let target = WireTarget::new(Recorder::new().respond_with(&[byte]), order, true);
        let (ports, mut io, _peer) = board(target);
        let mut bus = TwoWire::new(&mut io, LINES, config(order));

        prop_assert!(bus.start(Some(0x68), true));
        prop_assert_eq!(bus.read(true), byte);
        bus.stop();

        prop_assert_eq!(ports.contention(), 0);
    }
}
