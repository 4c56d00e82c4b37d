//! Free-running system timer in slot 0.

use sortbench_common::mmio::SYS_CLK_MHZ;
use sortbench_core::bus::{MmioBus, RegisterBus};
use sortbench_core::timing::CycleCounter;

const COUNTER_LOWER_REG: u32 = 0;
const COUNTER_UPPER_REG: u32 = 1;
const CTRL_REG: u32 = 2;

const GO_FIELD: u32 = 1 << 0;
const CLR_FIELD: u32 = 1 << 1;

/// 64-bit cycle counter with go and clear controls.
pub struct TimerCore {
    bus: MmioBus,
    ctrl: u32,
}

impl TimerCore {
    /// Takes over the timer and starts it counting.
    pub fn new(mut bus: MmioBus) -> Self {
        bus.write(CTRL_REG, GO_FIELD);
        Self { bus, ctrl: GO_FIELD }
    }

    /// Elapsed time since the last clear, in microseconds.
    pub fn read_micros(&mut self) -> u64 {
        self.read_ticks() / SYS_CLK_MHZ
    }

    /// Busy-waits for `ms` milliseconds. The counter must be running.
    pub fn sleep_ms(&mut self, ms: u64) {
        let start = self.read_micros();
        while self.read_micros().wrapping_sub(start) < ms * 1000 {
            core::hint::spin_loop();
        }
    }
}

impl CycleCounter for TimerCore {
    fn clear(&mut self) {
        // The clear bit is a one-shot pulse; `ctrl` keeps only `go`.
        self.bus.write(CTRL_REG, self.ctrl | CLR_FIELD);
    }

    fn start(&mut self) {
        self.ctrl |= GO_FIELD;
        self.bus.write(CTRL_REG, self.ctrl);
    }

    fn stop(&mut self) {
        self.ctrl &= !GO_FIELD;
        self.bus.write(CTRL_REG, self.ctrl);
    }

    fn read_ticks(&mut self) -> u64 {
        let lower = self.bus.read(COUNTER_LOWER_REG) as u64;
        let upper = self.bus.read(COUNTER_UPPER_REG) as u64;
        (upper << 32) | lower
    }
}
