//! Shared mocks for the core integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use sortbench_common::limits::MAX_ELEMENTS;
use sortbench_common::sort_core::{
    CTRL_INIT, CTRL_REG, CTRL_SORT, CTRL_WRITE, READ_DATA_REG, SIZE_REG, STATUS_REG,
    WRITE_DATA_REG,
};
use sortbench_core::accelerator::{DriverConfig, SortAccelerator};
use sortbench_core::bench::Benchmark;
use sortbench_core::bus::RegisterBus;
use sortbench_core::controller::Controller;
use sortbench_core::timing::CycleCounter;

/// A single recorded register transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Read(u32),
    Write(u32, u32),
}

/// Minimal accelerator stand-in that records every transaction.
///
/// Words written in write mode are stored at an auto-incrementing cursor
/// and handed back in read mode. When `sorts` is set, asserting the sort
/// bit sorts the first N words.
pub struct MockUnit {
    pub ops: Vec<BusOp>,
    pub memory: Vec<u16>,
    pub n: usize,
    pub cursor: usize,
    pub control: u32,
    pub sorts: bool,
    pub done: bool,
    pub never_done: bool,
}

impl MockUnit {
    pub fn loopback() -> Self {
        Self {
            ops: Vec::new(),
            memory: vec![0; MAX_ELEMENTS],
            n: 0,
            cursor: 0,
            control: 0,
            sorts: false,
            done: false,
            never_done: false,
        }
    }

    pub fn sorting() -> Self {
        Self {
            sorts: true,
            ..Self::loopback()
        }
    }

    pub fn stuck() -> Self {
        Self {
            never_done: true,
            ..Self::sorting()
        }
    }

    /// Values written to the control register, in order.
    pub fn control_writes(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(CTRL_REG, v) => Some(*v),
                _ => None,
            })
            .collect()
    }
}

impl RegisterBus for MockUnit {
    fn read(&mut self, reg: u32) -> u32 {
        self.ops.push(BusOp::Read(reg));
        match reg {
            STATUS_REG => self.done as u32,
            READ_DATA_REG if self.control == CTRL_INIT => {
                let value = self.memory[self.cursor % MAX_ELEMENTS];
                self.cursor += 1;
                value as u32
            }
            _ => 0,
        }
    }

    fn write(&mut self, reg: u32, value: u32) {
        self.ops.push(BusOp::Write(reg, value));
        match reg {
            SIZE_REG => self.n = value as usize,
            CTRL_REG => {
                if value & CTRL_INIT != 0 {
                    self.cursor = 0;
                }
                if value & CTRL_SORT != 0 {
                    if self.sorts {
                        self.memory[..self.n].sort_unstable();
                    }
                    self.done = !self.never_done;
                }
                self.control = value;
            }
            WRITE_DATA_REG if self.control == CTRL_WRITE | CTRL_INIT => {
                self.memory[self.cursor % MAX_ELEMENTS] = value as u16;
                self.cursor += 1;
            }
            _ => {}
        }
    }
}

/// Counter that advances by a scripted amount on every `stop`.
pub struct FakeCounter {
    pub ticks: u64,
    pub running: bool,
    pub per_run: VecDeque<u64>,
}

impl FakeCounter {
    pub fn new(per_run: &[u64]) -> Self {
        Self {
            ticks: 0,
            running: false,
            per_run: per_run.iter().copied().collect(),
        }
    }
}

impl CycleCounter for FakeCounter {
    fn clear(&mut self) {
        self.ticks = 0;
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        if self.running {
            self.ticks += self.per_run.pop_front().unwrap_or(1);
        }
        self.running = false;
    }

    fn read_ticks(&mut self) -> u64 {
        self.ticks
    }
}

pub fn benchmark(unit: MockUnit, per_run: &[u64]) -> Benchmark<MockUnit, FakeCounter> {
    Benchmark::new(
        SortAccelerator::new(unit, DriverConfig::default()),
        FakeCounter::new(per_run),
    )
}

pub fn controller(unit: MockUnit, per_run: &[u64]) -> Box<Controller<MockUnit, FakeCounter>> {
    Box::new(Controller::new(benchmark(unit, per_run)))
}
