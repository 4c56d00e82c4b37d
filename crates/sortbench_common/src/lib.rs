//! Common definitions and constants shared across the sort benchmark system.
//!
//! This crate provides the memory map of the soft-core SoC, the register map
//! of the sorting accelerator, and the bit assignments of the user-facing
//! buttons and switches. Firmware, the core controller, the accelerator
//! model and the host tools all agree on these values.

#![no_std]

// Memory-mapped I/O address space of the SoC.
//
// Peripherals hang off a single bus bridge. Each peripheral owns one slot of
// 32 word-sized registers, so the address of register `r` in slot `s` is
// `BRIDGE_BASE + s * 128 + r * 4`.
pub mod mmio {
    /// Base address of the peripheral bus bridge.
    ///
    /// All I/O cores are reached through this window. The value must match
    /// the address assigned to the bridge in the processor's address editor.
    pub const BRIDGE_BASE: usize = 0xC000_0000;

    /// Number of 32-bit registers reserved for each slot.
    pub const REGS_PER_SLOT: usize = 32;

    /// Free-running system timer used for cycle measurements.
    pub const S0_SYS_TIMER: usize = 0;

    /// UART used for the text log.
    pub const S1_UART: usize = 1;

    /// Switch inputs (general purpose input core).
    pub const S3_SW: usize = 3;

    /// Custom sorting accelerator.
    pub const S4_USER: usize = 4;

    /// Debounced push buttons.
    pub const S7_BTN: usize = 7;

    /// Seven-segment display controller.
    pub const S8_SSEG: usize = 8;

    /// System clock frequency in MHz, used to convert timer ticks to time.
    pub const SYS_CLK_MHZ: u64 = 100;

    /// Returns the base address of an I/O slot.
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot number on the bus bridge
    pub const fn slot_addr(slot: usize) -> usize {
        BRIDGE_BASE + slot * REGS_PER_SLOT * 4
    }
}

/// Register map and control bits of the sorting accelerator.
///
/// Offsets are word indices within the accelerator's slot. Data registers
/// are 32 bits wide on the bus but only the low 16 bits are significant.
pub mod sort_core {
    /// Write: store the next element at the auto-incrementing write cursor.
    pub const WRITE_DATA_REG: u32 = 0;

    /// Read: fetch the next element at the auto-incrementing read cursor.
    pub const READ_DATA_REG: u32 = 1;

    /// Write: number of elements for the upcoming session.
    pub const SIZE_REG: u32 = 2;

    /// Control register, see the `CTRL_*` bits.
    pub const CTRL_REG: u32 = 3;

    /// Status register, see [`STATUS_DONE`].
    pub const STATUS_REG: u32 = 4;

    /// Significant bits of every data word.
    pub const DATA_MASK: u32 = 0x0000_FFFF;

    /// Start sorting.
    pub const CTRL_SORT: u32 = 0b001;

    /// Reset the internal cursor to zero.
    pub const CTRL_INIT: u32 = 0b010;

    /// Select write mode (cleared selects read mode).
    pub const CTRL_WRITE: u32 = 0b100;

    /// All control bits cleared, the quiescent pattern.
    pub const CTRL_IDLE: u32 = 0;

    /// Sort-complete flag in the status register.
    pub const STATUS_DONE: u32 = 0b1;
}

/// Bit positions of the debounced push buttons.
pub mod buttons {
    pub const BTN_UP: u32 = 1 << 0;
    pub const BTN_RIGHT: u32 = 1 << 1;
    pub const BTN_DOWN: u32 = 1 << 2;
    pub const BTN_LEFT: u32 = 1 << 3;
    pub const BTN_CENTER: u32 = 1 << 4;

    /// Every button the controller reacts to.
    pub const BTN_ALL: u32 = BTN_UP | BTN_RIGHT | BTN_DOWN | BTN_LEFT | BTN_CENTER;
}

/// Bit assignments of the slide switches.
pub mod switches {
    /// Size code k = log2(N) on switches 3..0.
    pub const SIZE_CODE_MASK: u16 = 0x000F;

    /// When set, the center button does not start a sort.
    pub const SORT_LOCK: u16 = 1 << 12;

    /// Cycle count mode: show bits 31..16 instead of bits 15..0.
    pub const UPPER_HALF: u16 = 1 << 14;

    /// Display mode: browse the hardware array. Cycle count mode: show the
    /// hardware counter.
    pub const HW_SELECT: u16 = 1 << 15;
}

/// Limits of a benchmark run.
pub mod limits {
    /// Smallest supported size code (N = 16).
    pub const MIN_SIZE_CODE: u8 = 4;

    /// Largest supported size code (N = 8192).
    pub const MAX_SIZE_CODE: u8 = 13;

    /// Capacity of both data arrays and of the accelerator memory.
    pub const MAX_ELEMENTS: usize = 1 << MAX_SIZE_CODE;

    /// Largest N whose contents can be browsed on the four-digit display.
    pub const MAX_BROWSE_ELEMENTS: u16 = 256;

    /// Size codes below this value use 8-bit elements.
    pub const WIDE_SIZE_CODE: u8 = 9;

    /// Number of differing positions recorded in detail by a comparison.
    pub const MISMATCH_REPORT_LIMIT: usize = 10;

    /// Seed of the software pseudo-random generator.
    pub const LFSR_SEED: u16 = 0xACE1;
}
