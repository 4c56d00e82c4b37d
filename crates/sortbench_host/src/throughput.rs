//! Size sweeps and repeated trials against the accelerator model.

use crate::rig::{HostBenchmark, RigArgs};
use crate::stats::CycleStats;
use anyhow::{Result, anyhow, ensure};
use rayon::prelude::*;
use sortbench_common::limits::{MAX_SIZE_CODE, MIN_SIZE_CODE};
use sortbench_core::bench::BenchmarkResult;
use sortbench_core::config::SortConfig;
use sortbench_core::pattern::{self, Lfsr, Pattern};
use std::time::Instant;

/// Outcome of one size in a sweep.
struct SweepRow {
    config: SortConfig,
    result: Result<BenchmarkResult>,
}

/// Fills fresh arrays for `config` and runs both paths once.
fn run_once(
    bench: &mut HostBenchmark,
    config: &SortConfig,
    pattern: Pattern,
    lfsr: &mut Lfsr,
) -> Result<BenchmarkResult> {
    let n = config.len() as usize;
    let mut sw = vec![0u16; n];
    let mut hw = vec![0u16; n];
    pattern::fill(pattern, config, lfsr, &mut sw, &mut hw);

    let result = bench.run(&mut sw, &mut hw);
    match &result.fault {
        Some(e) => Err(anyhow!("N={}: {}", n, e)),
        None => Ok(result),
    }
}

fn sweep_one(rig: &RigArgs, k: u8, pattern: Pattern, seed: u16) -> SweepRow {
    let config = SortConfig::from_code(k);
    let result = rig.build().and_then(|mut bench| {
        let mut lfsr = Lfsr::new(seed);
        run_once(&mut bench, &config, pattern, &mut lfsr)
    });
    SweepRow { config, result }
}

/// Runs both sort paths once for every size code and prints a table.
pub fn run_sweep(rig: &RigArgs, pattern: Pattern, seed: u16, parallel: bool) -> Result<()> {
    ensure!(seed != 0, "an LFSR seed of zero never leaves zero");
    rig.build()?;

    println!("Sweep: {} data, k = {}..={}", pattern.name(), MIN_SIZE_CODE, MAX_SIZE_CODE);
    let start = Instant::now();

    let codes: Vec<u8> = (MIN_SIZE_CODE..=MAX_SIZE_CODE).collect();
    let rows: Vec<SweepRow> = if parallel {
        codes
            .par_iter()
            .map(|&k| sweep_one(rig, k, pattern, seed))
            .collect()
    } else {
        codes
            .iter()
            .map(|&k| sweep_one(rig, k, pattern, seed))
            .collect()
    };

    println!(
        "{:>2} {:>5} {:>2} {:>14} {:>14} {:>10} {:>10}",
        "k", "N", "w", "sw ticks", "hw ticks", "speedup %", "mismatch"
    );
    let mut failures = 0;
    for row in &rows {
        let c = &row.config;
        match &row.result {
            Ok(r) => {
                println!(
                    "{:>2} {:>5} {:>2} {:>14} {:>14} {:>10.2} {:>10}",
                    c.size_code(),
                    c.len(),
                    c.width(),
                    r.sw_cycles,
                    r.hw_cycles,
                    r.speedup_percent(),
                    r.mismatch_count
                );
                if !r.is_match() {
                    log::warn!("Sweep row k={} sorted incorrectly", c.size_code());
                    failures += 1;
                }
            }
            Err(e) => {
                log::warn!("Sweep row k={} failed: {:#}", c.size_code(), e);
                println!("{:>2} {:>5} {:>2} error: {}", c.size_code(), c.len(), c.width(), e);
                failures += 1;
            }
        }
    }

    println!("Time: {:.4} s", start.elapsed().as_secs_f64());
    println!("Passed: {}/{}", rows.len() - failures, rows.len());
    Ok(())
}

/// Repeats one configuration and prints min / avg / max for both paths.
pub fn run_stats(rig: &RigArgs, k: u8, pattern: Pattern, trials: u32, seed: u16) -> Result<()> {
    ensure!(trials > 0, "need at least one trial");
    ensure!(seed != 0, "an LFSR seed of zero never leaves zero");

    let config = SortConfig::from_code(k);
    let mut bench = rig.build()?;
    let mut lfsr = Lfsr::new(seed);
    let mut sw_stats = CycleStats::new();
    let mut hw_stats = CycleStats::new();
    let mut mismatched_trials = 0;

    println!(
        "Stats: N={} w={} {} data, {} trials",
        config.len(),
        config.width(),
        pattern.name(),
        trials
    );

    for _ in 0..trials {
        let result = run_once(&mut bench, &config, pattern, &mut lfsr)?;
        sw_stats.update(result.sw_cycles);
        hw_stats.update(result.hw_cycles);
        if !result.is_match() {
            mismatched_trials += 1;
        }
    }

    sw_stats.print_row("software");
    hw_stats.print_row("hardware");
    println!(
        "Mean speedup: {:.2} %",
        sortbench_core::bench::speedup_percent(sw_stats.avg() as u64, hw_stats.avg() as u64)
    );
    println!("Mismatched trials: {}/{}", mismatched_trials, trials);
    Ok(())
}
