//! Driver for the hardware sorting accelerator.
//!
//! The accelerator is an opaque block that sorts up to 8192 16-bit words.
//! Software talks to it through five registers: data in, data out, size,
//! control and status. A session follows a fixed sequence:
//!
//! ```text
//! IDLE --begin_write--> WRITE --(N writes)--> start_sort --> SORTING
//!   ^                                                          |
//!   |                                                   done bit set
//!   |                                                          v
//!   +----go_idle---- (N reads) <--begin_read-- READ <----------+
//! ```
//!
//! The control register is always cleared before a new mode is selected.
//! Switching directly from one non-zero control pattern to another leaves
//! the unit's internal state machine in an undefined transition.

use crate::BenchError;
use crate::bus::RegisterBus;
use sortbench_common::sort_core::{
    CTRL_IDLE, CTRL_INIT, CTRL_REG, CTRL_SORT, CTRL_WRITE, DATA_MASK, READ_DATA_REG, SIZE_REG,
    STATUS_DONE, STATUS_REG, WRITE_DATA_REG,
};

/// Upper bound on the number of done-bit polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollBudget {
    /// Spin until the unit reports completion, however long that takes.
    ///
    /// A unit that never asserts done hangs the caller forever.
    #[default]
    Unbounded,

    /// Give up after the given number of status reads.
    Bounded(u32),
}

/// Tunable timing parameters of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Spin iterations between resetting the read cursor and the first read.
    ///
    /// The unit needs a few cycles for the cursor and its output register
    /// to settle after the init pulse.
    pub settle_spins: u32,

    /// Limit applied by [`SortAccelerator::wait_done`].
    pub poll_budget: PollBudget,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            settle_spins: 10,
            poll_budget: PollBudget::Unbounded,
        }
    }
}

/// Register-level driver for one sorting accelerator instance.
///
/// The driver does not track the unit's cursor. It relies on the caller to
/// issue exactly N data transactions per phase, in order, with no other
/// accelerator access interleaved.
pub struct SortAccelerator<B: RegisterBus> {
    bus: B,
    config: DriverConfig,
    /// Copy of the last word sent to the data register. Diagnostic only.
    shadow: u32,
}

impl<B: RegisterBus> SortAccelerator<B> {
    /// Wraps a register bus connected to the accelerator block.
    pub fn new(bus: B, config: DriverConfig) -> Self {
        Self {
            bus,
            config,
            shadow: 0,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Returns the last word written to the data register.
    pub fn last_written(&self) -> u32 {
        self.shadow
    }

    /// Sets the number of elements for the upcoming session.
    pub fn configure(&mut self, n: u16) {
        self.bus.write(SIZE_REG, n as u32);
    }

    /// Enters write mode with the write cursor reset to zero.
    ///
    /// Clears the control register first so that any residual sort or read
    /// state is dropped, then asserts write-mode together with init.
    pub fn begin_write(&mut self) {
        self.bus.write(CTRL_REG, CTRL_IDLE);
        self.bus.write(CTRL_REG, CTRL_WRITE | CTRL_INIT);
    }

    /// Stores one element at the write cursor, which then advances.
    pub fn write_element(&mut self, value: u16) {
        self.shadow = value as u32 & DATA_MASK;
        self.bus.write(WRITE_DATA_REG, self.shadow);
    }

    /// Starts sorting the loaded elements. Does not wait for completion.
    pub fn start_sort(&mut self) {
        self.bus.write(CTRL_REG, CTRL_SORT);
    }

    /// Reads the done bit of the status register.
    pub fn is_done(&mut self) -> bool {
        self.bus.read(STATUS_REG) & STATUS_DONE != 0
    }

    /// Polls the done bit until it is set.
    ///
    /// With [`PollBudget::Unbounded`] this spins forever on a unit that never
    /// completes. With a bounded budget it stops after that many reads.
    ///
    /// # Returns
    ///
    /// The number of status reads issued, or
    /// [`BenchError::AcceleratorTimeout`] if the budget ran out first.
    pub fn wait_done(&mut self) -> Result<u32, BenchError> {
        let mut polls: u32 = 0;
        loop {
            polls = polls.saturating_add(1);
            if self.is_done() {
                return Ok(polls);
            }
            if let PollBudget::Bounded(limit) = self.config.poll_budget {
                if polls >= limit {
                    return Err(BenchError::AcceleratorTimeout { polls });
                }
            }
            core::hint::spin_loop();
        }
    }

    /// Enters read mode with the read cursor reset to zero.
    ///
    /// Leaves compute mode by clearing the control register, pulses init
    /// alone, then waits `settle_spins` iterations before returning.
    pub fn begin_read(&mut self) {
        self.bus.write(CTRL_REG, CTRL_IDLE);
        self.bus.write(CTRL_REG, CTRL_INIT);
        self.settle();
    }

    /// Reads one element at the read cursor, which then advances.
    pub fn read_element(&mut self) -> u16 {
        (self.bus.read(READ_DATA_REG) & DATA_MASK) as u16
    }

    /// Clears the control register, leaving the unit quiescent.
    pub fn go_idle(&mut self) {
        self.bus.write(CTRL_REG, CTRL_IDLE);
    }

    fn settle(&self) {
        for _ in 0..self.config.settle_spins {
            core::hint::spin_loop();
        }
    }
}
