//! Tests that a benchmark run emits its verification report through `log`.

mod common;

use common::{FakeCounter, MockUnit, benchmark};
use log::{Level, LevelFilter, Log, Metadata, Record};
use sortbench_core::accelerator::{DriverConfig, PollBudget, SortAccelerator};
use sortbench_core::bench::Benchmark;
use std::sync::Mutex;

struct Capture {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

fn take_lines() -> Vec<(Level, String)> {
    std::mem::take(&mut *CAPTURE.lines.lock().unwrap())
}

fn count(lines: &[(Level, String)], prefix: &str) -> usize {
    lines.iter().filter(|(_, m)| m.starts_with(prefix)).count()
}

/// Tests the report lines for a bad sort and for a timed-out sort.
#[test]
fn test_run_logs_verification_report() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Info);

    let mut sw = vec![3u16, 2, 1, 0];
    let mut hw = sw.clone();
    benchmark(MockUnit::loopback(), &[]).run(&mut sw, &mut hw);

    let lines = take_lines();
    assert_eq!(count(&lines, "Mismatch at index"), 4);
    assert!(lines.contains(&(Level::Warn, "FAIL: 4 mismatches found".to_string())));
    assert_eq!(count(&lines, "HW is "), 1);

    let config = DriverConfig {
        settle_spins: 0,
        poll_budget: PollBudget::Bounded(4),
    };
    let mut bench = Benchmark::new(
        SortAccelerator::new(MockUnit::stuck(), config),
        FakeCounter::new(&[]),
    );
    let mut sw = vec![1u16, 0];
    let mut hw = sw.clone();
    bench.run(&mut sw, &mut hw);

    let lines = take_lines();
    assert_eq!(
        lines
            .iter()
            .filter(|(l, m)| *l == Level::Error && m.starts_with("Hardware sort failed"))
            .count(),
        1
    );
    assert_eq!(count(&lines, "HW is 0.00% faster"), 1);
}
