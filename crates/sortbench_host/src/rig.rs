//! Host stand-ins for the board: clock, input panel, display and the
//! accelerator model behind the driver.

use anyhow::{Result, ensure};
use clap::{Args, ValueEnum};
use sortbench_core::accelerator::{DriverConfig, PollBudget, SortAccelerator};
use sortbench_core::bench::Benchmark;
use sortbench_core::display::{Frame, SegmentDisplay};
use sortbench_core::input::InputPanel;
use sortbench_core::pattern::Pattern;
use sortbench_core::timing::CycleCounter;
use sortbench_hw::{Fault, ModelConfig, SortCoreModel};
use sortbench_io::InputFrame;
use std::time::{Duration, Instant};

pub type HostBenchmark = Benchmark<SortCoreModel, WallClock>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FaultArg {
    None,
    NeverDone,
    ReadLatency,
}

impl From<FaultArg> for Fault {
    fn from(arg: FaultArg) -> Self {
        match arg {
            FaultArg::None => Fault::None,
            FaultArg::NeverDone => Fault::NeverDone,
            FaultArg::ReadLatency => Fault::ReadLatency,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PatternArg {
    Random,
    Descending,
}

impl From<PatternArg> for Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Random => Pattern::Random,
            PatternArg::Descending => Pattern::Descending,
        }
    }
}

/// Driver and model options shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct RigArgs {
    /// Busy-wait iterations after the read-mode init pulse
    #[arg(long, default_value_t = 10)]
    pub settle_spins: u32,

    /// Give up waiting for the done bit after this many polls
    #[arg(long)]
    pub poll_budget: Option<u32>,

    /// Status polls the model answers with not-done after a sort starts
    #[arg(long, default_value_t = 8)]
    pub latency: u32,

    #[arg(long, value_enum, default_value_t = FaultArg::None)]
    pub fault: FaultArg,
}

impl RigArgs {
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            settle_spins: self.settle_spins,
            poll_budget: match self.poll_budget {
                Some(n) => PollBudget::Bounded(n),
                None => PollBudget::Unbounded,
            },
        }
    }

    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            sort_latency: self.latency,
            fault: self.fault.into(),
            trace: false,
        }
    }

    /// Builds a benchmark over a fresh model.
    ///
    /// Rejects a model that never finishes combined with an unbounded wait,
    /// which would hang the process.
    pub fn build(&self) -> Result<HostBenchmark> {
        ensure!(
            !(self.fault == FaultArg::NeverDone && self.poll_budget.is_none()),
            "--fault never-done needs --poll-budget, the wait would never return"
        );
        let accel = SortAccelerator::new(SortCoreModel::new(self.model_config()), self.driver_config());
        Ok(Benchmark::new(accel, WallClock::default()))
    }
}

/// Cycle counter backed by the host's monotonic clock. Ticks are
/// nanoseconds.
#[derive(Default)]
pub struct WallClock {
    started: Option<Instant>,
    elapsed: Duration,
}

impl CycleCounter for WallClock {
    fn clear(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
    }

    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(t0) = self.started.take() {
            self.elapsed += t0.elapsed();
        }
    }

    fn read_ticks(&mut self) -> u64 {
        let running = self.started.map(|t0| t0.elapsed()).unwrap_or_default();
        (self.elapsed + running).as_nanos() as u64
    }
}

/// Input panel that plays back expanded script frames.
pub struct ScriptedPanel {
    frames: Vec<InputFrame>,
    next: usize,
    current: InputFrame,
}

impl ScriptedPanel {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self {
            frames,
            next: 0,
            current: InputFrame::default(),
        }
    }

    /// Moves to the next frame. Returns `false` once the script is spent.
    pub fn advance(&mut self) -> bool {
        match self.frames.get(self.next) {
            Some(frame) => {
                self.current = *frame;
                self.next += 1;
                true
            }
            None => false,
        }
    }

    /// Number of frames played so far.
    pub fn position(&self) -> usize {
        self.next
    }
}

impl InputPanel for ScriptedPanel {
    fn read_buttons(&mut self) -> u32 {
        self.current.buttons
    }

    fn read_switches(&mut self) -> u16 {
        self.current.switches
    }
}

/// Prints a line to stdout whenever the shown frame changes.
#[derive(Default)]
pub struct ConsoleDisplay {
    shown: Option<Frame>,
    iteration: usize,
}

impl SegmentDisplay for ConsoleDisplay {
    fn render(&mut self, frame: &Frame) {
        self.iteration += 1;
        if self.shown != Some(*frame) {
            println!("{:>6}  [{}]", self.iteration, frame);
            self.shown = Some(*frame);
        }
    }
}
