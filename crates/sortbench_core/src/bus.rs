//! Register-level access to memory-mapped peripheral blocks.
//!
//! Every I/O core on the SoC is a block of word-sized registers. The
//! [`RegisterBus`] trait abstracts single-word reads and writes to a numbered
//! register so that drivers can run against real hardware ([`MmioBus`]) or
//! against a software model of the peripheral.

/// Single-word register transactions inside one peripheral block.
///
/// Transactions are synchronous and assumed to always succeed. Bus errors
/// are a hardware-level concern and are not reported to drivers.
pub trait RegisterBus {
    /// Reads the 32-bit register at word offset `reg`.
    fn read(&mut self, reg: u32) -> u32;

    /// Writes `value` to the 32-bit register at word offset `reg`.
    fn write(&mut self, reg: u32, value: u32);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read(&mut self, reg: u32) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: u32, value: u32) {
        (**self).write(reg, value)
    }
}

/// Volatile MMIO access to a peripheral block at a fixed base address.
///
/// Each register `r` lives at `base + 4 * r`. All accesses go through
/// `read_volatile`/`write_volatile` so the compiler never merges, reorders
/// or elides them.
#[derive(Debug, Clone, Copy)]
pub struct MmioBus {
    base: usize,
}

impl MmioBus {
    /// Creates a bus handle for the block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a mapped peripheral block with at least
    /// as many registers as the driver using this handle will touch, and no
    /// other code may issue conflicting accesses to the same block.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    #[inline(always)]
    fn reg_ptr(&self, reg: u32) -> *mut u32 {
        (self.base as *mut u32).wrapping_add(reg as usize)
    }
}

impl RegisterBus for MmioBus {
    #[inline(always)]
    fn read(&mut self, reg: u32) -> u32 {
        // Safety: `new` requires `base` to point at a mapped register block.
        let value = unsafe { self.reg_ptr(reg).read_volatile() };
        core::sync::atomic::fence(core::sync::atomic::Ordering::Acquire);
        value
    }

    #[inline(always)]
    fn write(&mut self, reg: u32, value: u32) {
        core::sync::atomic::fence(core::sync::atomic::Ordering::Release);
        // Safety: `new` requires `base` to point at a mapped register block.
        unsafe { self.reg_ptr(reg).write_volatile(value) }
    }
}
