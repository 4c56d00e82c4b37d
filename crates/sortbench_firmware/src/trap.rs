//! Machine-mode trap handler.
//!
//! The firmware enables no interrupts, so any trap is a fault: an illegal
//! instruction, a misaligned or faulting access. The handler reports it on
//! the console and parks the hart.

use crate::console;
use riscv::register::{mcause, mepc, mtval};

/// Called from `trap_entry` in `entry.S`. Never returns.
#[unsafe(no_mangle)]
pub extern "C" fn rust_trap_handler() -> ! {
    let cause = mcause::read();
    console::fault_println!(
        "TRAP: mcause={:#010x} mepc={:#010x} mtval={:#010x}",
        cause.bits(),
        mepc::read(),
        mtval::read()
    );
    halt()
}

/// Parks the hart for good.
pub fn halt() -> ! {
    loop {
        // Safety: `wfi` only stalls the hart until an interrupt, none are enabled.
        unsafe { riscv::asm::wfi() };
    }
}
