//! Integration tests running the driver, benchmark and controller against
//! the accelerator model.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sortbench_common::buttons::{BTN_CENTER, BTN_LEFT, BTN_RIGHT};
use sortbench_common::sort_core::{CTRL_INIT, CTRL_REG, CTRL_SORT, CTRL_WRITE, WRITE_DATA_REG};
use sortbench_core::BenchError;
use sortbench_core::accelerator::{DriverConfig, PollBudget, SortAccelerator};
use sortbench_core::bench::Benchmark;
use sortbench_core::bus::RegisterBus;
use sortbench_core::controller::{Controller, Mode};
use sortbench_core::timing::CycleCounter;
use sortbench_hw::{BusOp, Fault, ModelConfig, SortCoreModel};

/// Counter that counts calls to `stop`, enough to tell the paths apart.
#[derive(Default)]
struct StepCounter {
    ticks: u64,
}

impl CycleCounter for StepCounter {
    fn clear(&mut self) {
        self.ticks = 0;
    }

    fn start(&mut self) {}

    fn stop(&mut self) {
        self.ticks += 1;
    }

    fn read_ticks(&mut self) -> u64 {
        self.ticks
    }
}

fn bench_with(model: ModelConfig, driver: DriverConfig) -> Benchmark<SortCoreModel, StepCounter> {
    Benchmark::new(
        SortAccelerator::new(SortCoreModel::new(model), driver),
        StepCounter::default(),
    )
}

fn bench(model: ModelConfig) -> Benchmark<SortCoreModel, StepCounter> {
    bench_with(model, DriverConfig::default())
}

/// Tests that shuffled permutations come back sorted without violations.
#[test]
fn test_round_trip_permutations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut bench = bench(ModelConfig::default());

    for k in 4..=13 {
        let n = 1usize << k;
        let mut data: Vec<u16> = (0..n as u16).collect();
        data.shuffle(&mut rng);

        bench.run_hardware_sort(&mut data).unwrap();

        assert_eq!(data, (0..n as u16).collect::<Vec<_>>());
    }

    let model = bench.accelerator().bus();
    assert_eq!(model.violations(), 0);
    assert_eq!(model.sessions(), 10);
    assert_eq!(model.control(), 0);
}

/// Tests that both paths agree on random 16-bit data with duplicates.
#[test]
fn test_both_paths_agree_on_random_data() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut sw: Vec<u16> = (0..2048).map(|_| rng.gen_range(0..512)).collect();
    let mut hw = sw.clone();

    let mut bench = bench(ModelConfig::default());
    let result = bench.run(&mut sw, &mut hw);

    assert!(result.is_match());
    assert!(result.fault.is_none());
    assert_eq!(sw, hw);
    assert!(sw.windows(2).all(|w| w[0] <= w[1]));
}

/// Tests that the done bit asserts after the configured latency.
#[test]
fn test_sort_latency_in_polls() {
    let config = ModelConfig {
        sort_latency: 50,
        ..ModelConfig::default()
    };
    let mut accel = SortAccelerator::new(SortCoreModel::new(config), DriverConfig::default());
    accel.configure(16);
    accel.begin_write();
    for v in (0..16).rev() {
        accel.write_element(v);
    }
    accel.start_sort();

    assert_eq!(accel.wait_done(), Ok(51));
    assert_eq!(accel.bus().contents(), (0..16).collect::<Vec<u16>>().as_slice());
}

/// Tests that a stuck unit is reported when the wait is bounded.
#[test]
fn test_never_done_with_budget() {
    let model = ModelConfig {
        fault: Fault::NeverDone,
        ..ModelConfig::default()
    };
    let driver = DriverConfig {
        settle_spins: 0,
        poll_budget: PollBudget::Bounded(1000),
    };
    let mut bench = bench_with(model, driver);
    let mut data = vec![3u16, 1, 2];

    let err = bench.run_hardware_sort(&mut data).unwrap_err();

    assert_eq!(err, BenchError::AcceleratorTimeout { polls: 1000 });
    assert_eq!(data, vec![3, 1, 2]);
    assert_eq!(bench.accelerator().bus().control(), 0);
    assert_eq!(bench.accelerator().bus().violations(), 0);
}

/// Tests that a lagging read register shows up as shifted results.
#[test]
fn test_read_latency_fault_shifts_output() {
    let model = ModelConfig {
        fault: Fault::ReadLatency,
        ..ModelConfig::default()
    };
    let mut sw: Vec<u16> = (1..=16).rev().collect();
    let mut hw = sw.clone();

    let mut bench = bench(model);
    let result = bench.run(&mut sw, &mut hw);

    assert_eq!(hw[0], 0);
    assert_eq!(&hw[1..], &sw[..15]);
    assert_eq!(result.mismatch_count, 16);
    assert_eq!(result.mismatches[0].index, 0);
    assert_eq!(result.mismatches[0].actual, 0);
}

/// Tests that entering write mode straight from sort mode is flagged.
#[test]
fn test_init_without_idle_is_a_violation() {
    let mut model = SortCoreModel::default();
    model.write(CTRL_REG, CTRL_SORT);
    model.write(CTRL_REG, CTRL_WRITE | CTRL_INIT);
    assert_eq!(model.violations(), 1);

    model.write(CTRL_REG, 0);
    model.write(CTRL_REG, CTRL_WRITE | CTRL_INIT);
    assert_eq!(model.violations(), 1);
}

/// Tests that data writes outside write mode are dropped and flagged.
#[test]
fn test_write_outside_write_mode_is_dropped() {
    let mut model = SortCoreModel::default();
    model.write(0x2, 4);
    model.write(WRITE_DATA_REG, 0x1234);

    assert_eq!(model.violations(), 1);
    assert_eq!(model.contents(), &[0, 0, 0, 0]);
}

/// Tests that upper data bits are discarded by the model.
#[test]
fn test_data_is_sixteen_bits() {
    let mut model = SortCoreModel::default();
    model.write(0x2, 1);
    model.write(CTRL_REG, CTRL_WRITE | CTRL_INIT);
    model.write(WRITE_DATA_REG, 0xDEAD_BEEF);
    assert_eq!(model.contents(), &[0xBEEF]);
}

/// Tests that the trace captures the driver's transactions in order.
#[test]
fn test_trace_records_session() {
    let model = ModelConfig {
        sort_latency: 0,
        trace: true,
        ..ModelConfig::default()
    };
    let mut bench = bench(model);
    let mut data = vec![2u16, 1];
    bench.run_hardware_sort(&mut data).unwrap();

    let trace = bench.accelerator().bus().trace();
    assert_eq!(trace[0], BusOp::Write { reg: 2, value: 2 });
    assert_eq!(trace[1], BusOp::Write { reg: 3, value: 0 });
    assert_eq!(trace[2], BusOp::Write { reg: 3, value: 6 });
    assert_eq!(trace[3], BusOp::Write { reg: 0, value: 2 });
    assert_eq!(trace[4], BusOp::Write { reg: 0, value: 1 });
    assert_eq!(trace[5], BusOp::Write { reg: 3, value: 1 });
    assert_eq!(trace[6], BusOp::Read { reg: 4, value: 1 });
    assert_eq!(trace[7], BusOp::Write { reg: 3, value: 0 });
    assert_eq!(trace[8], BusOp::Write { reg: 3, value: 2 });
    assert_eq!(trace[9], BusOp::Read { reg: 1, value: 1 });
    assert_eq!(trace[10], BusOp::Read { reg: 1, value: 2 });
    assert_eq!(trace[11], BusOp::Write { reg: 3, value: 0 });
    assert_eq!(trace.len(), 12);
}

/// Tests repeated sort runs from the controller at every size.
#[test]
fn test_controller_sweep_all_sizes() {
    let mut ctrl = Box::new(Controller::new(bench(ModelConfig::default())));

    for k in 4u16..=13 {
        let button = if k % 2 == 0 { BTN_RIGHT } else { BTN_LEFT };
        ctrl.step(button, k);
        ctrl.step(0, k);
        assert_eq!(ctrl.mode(), Mode::Display);

        ctrl.step(BTN_CENTER, k);
        ctrl.step(0, k);
        assert_eq!(ctrl.mode(), Mode::MismatchReport);
        assert!(ctrl.result().is_match(), "mismatch at k={}", k);
        assert_eq!(ctrl.sw_data().len(), 1 << k);

        ctrl.step(BTN_CENTER, k);
        ctrl.step(0, k);
        assert_eq!(ctrl.mode(), Mode::Display);
    }

    assert_eq!(ctrl.benchmark().accelerator().bus().violations(), 0);
}
