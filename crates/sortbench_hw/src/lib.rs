//! Behavioral model of the sorting accelerator.
//!
//! Implements the accelerator's register map on top of a plain memory array
//! so that the driver, the benchmark and the controller can be exercised on
//! a host. The model follows the same load / sort / drain sequence as the
//! RTL, counts protocol violations instead of silently misbehaving, and can
//! inject the faults seen during bring-up.

use sortbench_common::limits::MAX_ELEMENTS;
use sortbench_common::sort_core::{
    CTRL_IDLE, CTRL_INIT, CTRL_REG, CTRL_SORT, CTRL_WRITE, DATA_MASK, READ_DATA_REG, SIZE_REG,
    STATUS_DONE, STATUS_REG, WRITE_DATA_REG,
};
use sortbench_core::bus::RegisterBus;

/// Misbehavior injected into the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    /// The model behaves like working hardware.
    #[default]
    None,

    /// The done bit never asserts; the sort never finishes.
    NeverDone,

    /// The read data register lags the read cursor by one element.
    ///
    /// The first read after the init pulse returns zero and every later
    /// read returns the previous element, as with an unaccounted output
    /// register on the block RAM.
    ReadLatency,
}

/// Parameters of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Status reads that return not-done after the sort starts.
    pub sort_latency: u32,

    pub fault: Fault,

    /// Record every register transaction.
    pub trace: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            sort_latency: 8,
            fault: Fault::None,
            trace: false,
        }
    }
}

/// One register transaction as seen by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Read { reg: u32, value: u32 },
    Write { reg: u32, value: u32 },
}

/// Register-level model of the sorting accelerator.
pub struct SortCoreModel {
    config: ModelConfig,
    memory: Vec<u16>,
    n: usize,
    cursor: usize,
    control: u32,
    sorting: bool,
    done: bool,
    remaining: u32,
    /// Output register used by [`Fault::ReadLatency`].
    read_latch: u16,
    violations: u32,
    sessions: u32,
    trace: Vec<BusOp>,
}

impl SortCoreModel {
    /// Creates an idle model with zeroed memory.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            memory: vec![0; MAX_ELEMENTS],
            n: 0,
            cursor: 0,
            control: CTRL_IDLE,
            sorting: false,
            done: false,
            remaining: 0,
            read_latch: 0,
            violations: 0,
            sessions: 0,
            trace: Vec::new(),
        }
    }

    /// Current contents of the control register.
    pub fn control(&self) -> u32 {
        self.control
    }

    /// Number of protocol violations observed so far.
    ///
    /// A violation is an init pulse issued while the control register was
    /// not idle, a data write outside write mode, or a data read outside
    /// read mode.
    pub fn violations(&self) -> u32 {
        self.violations
    }

    /// Number of sorts that ran to completion.
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// The first N words of the model memory.
    pub fn contents(&self) -> &[u16] {
        &self.memory[..self.n]
    }

    pub fn trace(&self) -> &[BusOp] {
        &self.trace
    }

    fn write_mode(&self) -> bool {
        self.control == CTRL_WRITE | CTRL_INIT
    }

    fn read_mode(&self) -> bool {
        self.control == CTRL_INIT
    }

    fn violation(&mut self, what: &str) {
        self.violations += 1;
        log::warn!("sort core protocol violation: {}", what);
    }

    fn write_control(&mut self, value: u32) {
        let value = value & (CTRL_SORT | CTRL_INIT | CTRL_WRITE);

        if value & CTRL_INIT != 0 && self.control != CTRL_IDLE {
            self.violation("init asserted without passing through idle");
        }

        if value & CTRL_INIT != 0 {
            self.cursor = 0;
            self.read_latch = 0;
            if value & CTRL_WRITE != 0 {
                self.done = false;
            }
        }

        if value & CTRL_SORT != 0 && self.control & CTRL_SORT == 0 {
            self.sorting = true;
            self.done = false;
            self.remaining = self.config.sort_latency;
        }

        self.control = value;
    }

    fn finish_sort(&mut self) {
        self.memory[..self.n].sort_unstable();
        self.sorting = false;
        self.done = true;
        self.sessions += 1;
    }

    fn read_status(&mut self) -> u32 {
        if self.sorting && self.config.fault != Fault::NeverDone {
            if self.remaining == 0 {
                self.finish_sort();
            } else {
                self.remaining -= 1;
            }
        }
        if self.done { STATUS_DONE } else { 0 }
    }

    fn read_data(&mut self) -> u32 {
        if !self.read_mode() {
            self.violation("data read outside read mode");
            return 0;
        }
        let current = self.memory[self.cursor % MAX_ELEMENTS];
        self.cursor += 1;
        let value = match self.config.fault {
            Fault::ReadLatency => core::mem::replace(&mut self.read_latch, current),
            _ => current,
        };
        value as u32
    }

    fn write_data(&mut self, value: u32) {
        if !self.write_mode() {
            self.violation("data write outside write mode");
            return;
        }
        self.memory[self.cursor % MAX_ELEMENTS] = (value & DATA_MASK) as u16;
        self.cursor += 1;
    }
}

impl Default for SortCoreModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl RegisterBus for SortCoreModel {
    fn read(&mut self, reg: u32) -> u32 {
        let value = match reg {
            READ_DATA_REG => self.read_data(),
            STATUS_REG => self.read_status(),
            CTRL_REG => self.control,
            _ => 0,
        };
        if self.config.trace {
            self.trace.push(BusOp::Read { reg, value });
        }
        value
    }

    fn write(&mut self, reg: u32, value: u32) {
        if self.config.trace {
            self.trace.push(BusOp::Write { reg, value });
        }
        match reg {
            WRITE_DATA_REG => self.write_data(value),
            SIZE_REG => self.n = ((value & DATA_MASK) as usize).min(MAX_ELEMENTS),
            CTRL_REG => self.write_control(value),
            _ => {}
        }
    }
}
