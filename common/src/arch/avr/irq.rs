use crate::sync::irq::IrqControl;

/// Status register, data-space address.
const SREG: *const u8 = 0x5F as *const u8;

/// Global interrupt enable bit of `SREG`.
const SREG_I_BIT: u8 = 1 << 7;

pub struct AvrIrq;

/// Interrupt control for 8-bit AVR cores.
///
/// The state is whether the I bit of `SREG` was set before `disable()`.
/// `cli`/`sei` are the only instructions that touch it, so restoring is a
/// matter of issuing `sei` when interrupts were on.
impl IrqControl for AvrIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        // SAFETY: SREG is always mapped; reading it has no side effects.
        let sreg = unsafe { core::ptr::read_volatile(SREG) };
        unsafe {
            core::arch::asm!("cli", options(nomem, nostack));
        }
        sreg & SREG_I_BIT != 0
    }

    #[inline(always)]
    fn restore(prev_enabled: bool) {
        if prev_enabled {
            unsafe {
                core::arch::asm!("sei", options(nomem, nostack));
            }
        }
    }

    #[inline(always)]
    unsafe fn enable() {
        unsafe {
            core::arch::asm!("sei", options(nomem, nostack));
        }
    }
}
