//! Software versus hardware sort benchmark.
//!
//! Both paths sort the same input. The software path runs a selection sort
//! on the processor; the hardware path streams the array through the
//! accelerator and drains the result back. Each path is timed on its own
//! and the two are never interleaved, so the counts stay independent.

use crate::BenchError;
use crate::accelerator::SortAccelerator;
use crate::bus::RegisterBus;
use crate::sort::selection_sort;
use crate::static_vec::StaticVec;
use crate::timing::CycleCounter;
use sortbench_common::limits::{MAX_ELEMENTS, MISMATCH_REPORT_LIMIT};

/// One position where the two result arrays differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    /// Value produced by the software sort.
    pub expected: u16,
    /// Value produced by the accelerator.
    pub actual: u16,
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenchmarkResult {
    /// Ticks spent in the software sort.
    pub sw_cycles: u64,

    /// Ticks spent in the hardware sort, including both transfers.
    pub hw_cycles: u64,

    /// Number of positions where the arrays differ.
    pub mismatch_count: usize,

    /// The first differing positions, in index order.
    pub mismatches: StaticVec<Mismatch, MISMATCH_REPORT_LIMIT>,

    /// Error raised by the hardware path, if it did not complete.
    pub fault: Option<BenchError>,
}

impl BenchmarkResult {
    /// True when both paths produced identical arrays.
    pub fn is_match(&self) -> bool {
        self.mismatch_count == 0
    }

    pub fn speedup_percent(&self) -> f64 {
        speedup_percent(self.sw_cycles, self.hw_cycles)
    }

    /// Logs the verification report and the timing summary.
    pub fn log_report(&self) {
        for m in &self.mismatches {
            log::warn!(
                "Mismatch at index [{}]: expected(SW)={} actual(HW)={}",
                m.index,
                m.expected,
                m.actual
            );
            if m.index == 0 && m.actual == 0 {
                log::warn!("  first element reads as zero, check read latency");
            }
        }
        if self.is_match() {
            log::info!("SUCCESS: all values match");
        } else {
            log::warn!("FAIL: {} mismatches found", self.mismatch_count);
        }
        log::info!(
            "SW cycles: {} (0x{:x}) | HW cycles: {} (0x{:x})",
            self.sw_cycles,
            self.sw_cycles,
            self.hw_cycles,
            self.hw_cycles
        );
        log::info!("HW is {:.2}% faster", self.speedup_percent());
    }
}

/// Compares two result arrays position by position.
///
/// Counts every differing position and records the first
/// `MISMATCH_REPORT_LIMIT` of them with both values.
/// Both slices must have length N.
pub fn compare(expected: &[u16], actual: &[u16]) -> BenchmarkResult {
    debug_assert_eq!(expected.len(), actual.len());
    let mut result = BenchmarkResult::default();
    for (index, (&e, &a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            let _ = result.mismatches.push(Mismatch {
                index,
                expected: e,
                actual: a,
            });
            result.mismatch_count += 1;
        }
    }
    result
}

/// Relative advantage of the hardware path, in percent.
///
/// Computes `(sw - hw) / hw * 100`. A zero hardware count is a degenerate
/// measurement and yields 0.
pub fn speedup_percent(sw_cycles: u64, hw_cycles: u64) -> f64 {
    if hw_cycles == 0 {
        return 0.0;
    }
    (sw_cycles as f64 - hw_cycles as f64) / hw_cycles as f64 * 100.0
}

/// Runs and times both sort paths.
pub struct Benchmark<B: RegisterBus, C: CycleCounter> {
    accel: SortAccelerator<B>,
    timer: C,
}

impl<B: RegisterBus, C: CycleCounter> Benchmark<B, C> {
    pub fn new(accel: SortAccelerator<B>, timer: C) -> Self {
        Self { accel, timer }
    }

    pub fn accelerator(&self) -> &SortAccelerator<B> {
        &self.accel
    }

    pub fn timer_mut(&mut self) -> &mut C {
        &mut self.timer
    }

    /// Sorts `data` in place on the processor.
    ///
    /// # Returns
    ///
    /// Elapsed ticks.
    pub fn run_software_sort(&mut self, data: &mut [u16]) -> u64 {
        self.timer.clear();
        self.timer.start();
        selection_sort(data);
        self.timer.stop();
        self.timer.read_ticks()
    }

    /// Sorts `data` in place on the accelerator.
    ///
    /// Loads every element, starts the sort, waits for the done bit and
    /// drains the sorted words back into `data`. The measured time covers
    /// both transfers as well as the sort itself.
    ///
    /// # Returns
    ///
    /// Elapsed ticks, [`BenchError::SizeOutOfRange`] if `data` is empty or
    /// larger than the accelerator memory, or
    /// [`BenchError::AcceleratorTimeout`] if a bounded poll budget ran out.
    /// On timeout the unit is returned to idle and `data` is left as loaded.
    pub fn run_hardware_sort(&mut self, data: &mut [u16]) -> Result<u64, BenchError> {
        let n = data.len();
        if n == 0 || n > MAX_ELEMENTS {
            return Err(BenchError::SizeOutOfRange { n });
        }

        self.timer.clear();
        self.timer.start();

        self.accel.configure(n as u16);
        self.accel.begin_write();
        for &value in data.iter() {
            self.accel.write_element(value);
        }

        self.accel.start_sort();
        if let Err(e) = self.accel.wait_done() {
            self.timer.stop();
            self.accel.go_idle();
            return Err(e);
        }

        self.accel.begin_read();
        for slot in data.iter_mut() {
            *slot = self.accel.read_element();
        }
        self.accel.go_idle();

        self.timer.stop();
        Ok(self.timer.read_ticks())
    }

    /// Runs the software sort, then the hardware sort, then compares and
    /// logs the verification report.
    ///
    /// `sw_data` and `hw_data` must hold the same input of length N. A
    /// failed hardware sort does not abort the run: it is kept in
    /// [`BenchmarkResult::fault`], `hw_cycles` is 0 and `hw_data` is
    /// compared as left by the failed session.
    pub fn run(&mut self, sw_data: &mut [u16], hw_data: &mut [u16]) -> BenchmarkResult {
        log::info!("Running software selection sort on {} elements", sw_data.len());
        let sw_cycles = self.run_software_sort(sw_data);

        log::info!("Running hardware-accelerated sort on {} elements", hw_data.len());
        let (hw_cycles, fault) = match self.run_hardware_sort(hw_data) {
            Ok(ticks) => (ticks, None),
            Err(e) => {
                log::error!("Hardware sort failed: {}", e);
                (0, Some(e))
            }
        };

        let mut result = compare(sw_data, hw_data);
        result.sw_cycles = sw_cycles;
        result.hw_cycles = hw_cycles;
        result.fault = fault;
        result.log_report();
        result
    }
}
