//! ATtiny167 register map (data-space addresses).
//!
//! Only the registers the clock touches are listed. I/O registers are given
//! at their memory-mapped address (I/O address + 0x20) so every access goes
//! through `read_volatile`/`write_volatile` on a plain pointer.

use core::ptr::{read_volatile, write_volatile};

// Port A
pub const PINA: usize = 0x20;
pub const DDRA: usize = 0x21;
pub const PORTA: usize = 0x22;

// Port B
pub const PINB: usize = 0x23;
pub const DDRB: usize = 0x24;
pub const PORTB: usize = 0x25;

// External interrupts
pub const EIFR: usize = 0x3C;
pub const EIMSK: usize = 0x3D;
pub const EICRA: usize = 0x69;
pub const INTF1: u8 = 1 << 1;
pub const INT1: u8 = 1 << 1;
pub const ISC11: u8 = 1 << 3;
pub const ISC10: u8 = 1 << 2;

// LIN/UART controller
pub const LINCR: usize = 0xC8;
pub const LINSIR: usize = 0xC9;
pub const LINENIR: usize = 0xCA;
pub const LINBTR: usize = 0xCC;
pub const LINBRRL: usize = 0xCD;
pub const LINBRRH: usize = 0xCE;
pub const LINDAT: usize = 0xD2;

pub const LINCR_LSWRES: u8 = 1 << 7;
pub const LINCR_LCONF_SHIFT: u8 = 4;
pub const LINCR_LENA: u8 = 1 << 3;
pub const LINCR_LCMD2: u8 = 1 << 2;
pub const LINCR_LCMD1: u8 = 1 << 1;
pub const LINCR_LCMD0: u8 = 1 << 0;
pub const LINSIR_LBUSY: u8 = 1 << 4;
pub const LINBTR_LDISR: u8 = 1 << 7;

/// Read an 8-bit register.
///
/// # Safety
/// `addr` must be one of the register addresses above.
#[inline(always)]
pub unsafe fn read(addr: usize) -> u8 {
    unsafe { read_volatile(addr as *const u8) }
}

/// Write an 8-bit register.
///
/// # Safety
/// `addr` must be one of the register addresses above.
#[inline(always)]
pub unsafe fn write(addr: usize, value: u8) {
    unsafe { write_volatile(addr as *mut u8, value) }
}

/// Read-modify-write helper.
///
/// # Safety
/// Same as [`write`]; the caller must also hold off interrupts that touch
/// the same register.
#[inline(always)]
pub unsafe fn modify(addr: usize, f: impl FnOnce(u8) -> u8) {
    unsafe { write(addr, f(read(addr))) }
}
