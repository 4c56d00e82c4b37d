//! Foreground state machine of the benchmark controller.
//!
//! One call to [`Controller::step`] is one iteration of the control loop:
//! sample inputs, advance the mode, derive the display frame. Everything
//! runs on the caller's thread. Entering [`Mode::Sorting`] blocks the next
//! iteration until both sorts have finished.
//!
//! | Mode | Press | Guard | Next |
//! |---|---|---|---|
//! | Idle | right / left | | Display (random / descending init) |
//! | Display | right / left | | Display (re-init) |
//! | Display | up / down | N <= 256 | Display (cursor +1 / -1, wrapping) |
//! | Display | center | lock switch low | Sorting |
//! | Sorting | (automatic) | | MismatchReport |
//! | MismatchReport | center | | Display |
//! | MismatchReport | left | | CycleCount |
//! | CycleCount | left | | Display |

use crate::BenchError;
use crate::bench::{Benchmark, BenchmarkResult};
use crate::bus::RegisterBus;
use crate::config::SortConfig;
use crate::display::{Frame, SegmentDisplay};
use crate::input::{ButtonEvent, EdgeDetector, InputPanel, Switches};
use crate::pattern::{self, Lfsr, Pattern};
use crate::timing::CycleCounter;
use sortbench_common::limits::MAX_ELEMENTS;

/// Top-level mode of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for the first initialization.
    Idle,
    /// Browsing array contents, or showing k and w for large arrays.
    Display,
    /// Both sorts run to completion on the next iteration.
    Sorting,
    /// Showing the number of mismatching positions.
    MismatchReport,
    /// Showing one half of one cycle counter.
    CycleCount,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Display => "DISPLAY",
            Mode::Sorting => "SORTING",
            Mode::MismatchReport => "MISMATCH",
            Mode::CycleCount => "CYCLE COUNT",
        }
    }
}

/// Owns both data arrays, the benchmark and the current mode.
pub struct Controller<B: RegisterBus, C: CycleCounter> {
    bench: Benchmark<B, C>,
    mode: Mode,
    config: SortConfig,
    cursor: u16,
    lfsr: Lfsr,
    edges: EdgeDetector,
    result: BenchmarkResult,
    sw_data: [u16; MAX_ELEMENTS],
    hw_data: [u16; MAX_ELEMENTS],
}

impl<B: RegisterBus, C: CycleCounter> Controller<B, C> {
    /// Creates a controller in [`Mode::Idle`] with zeroed arrays and the
    /// default configuration (k = 4).
    pub fn new(bench: Benchmark<B, C>) -> Self {
        Self {
            bench,
            mode: Mode::Idle,
            config: SortConfig::default(),
            cursor: 0,
            lfsr: Lfsr::default(),
            edges: EdgeDetector::default(),
            result: BenchmarkResult::default(),
            sw_data: [0; MAX_ELEMENTS],
            hw_data: [0; MAX_ELEMENTS],
        }
    }

    /// Records the button levels present before the first iteration.
    pub fn prime(&mut self, buttons: u32) {
        self.edges = EdgeDetector::new(buttons);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Current browse address.
    pub fn cursor(&self) -> u16 {
        self.cursor
    }

    /// The first N elements of the software-path array.
    pub fn sw_data(&self) -> &[u16] {
        &self.sw_data[..self.config.len() as usize]
    }

    /// The first N elements of the hardware-path array.
    pub fn hw_data(&self) -> &[u16] {
        &self.hw_data[..self.config.len() as usize]
    }

    /// Result of the most recent sort run.
    pub fn result(&self) -> &BenchmarkResult {
        &self.result
    }

    /// Error raised by the most recent hardware sort, if any.
    pub fn fault(&self) -> Option<BenchError> {
        self.result.fault
    }

    pub fn benchmark(&self) -> &Benchmark<B, C> {
        &self.bench
    }

    /// Runs one iteration of the control loop.
    ///
    /// # Arguments
    ///
    /// * `buttons` - Debounced button levels
    /// * `switches` - Switch levels
    ///
    /// # Returns
    ///
    /// The frame to show until the next iteration.
    pub fn step(&mut self, buttons: u32, switches: u16) -> Frame {
        let switches = Switches(switches);
        let events = self.edges.events(buttons);
        if !events.is_empty() {
            log::debug!("Buttons pressed: {:?}", events);
        }
        self.handle(&events, switches);
        self.frame(switches)
    }

    /// Samples `panel`, advances, and renders to `display`.
    pub fn poll<P: InputPanel, D: SegmentDisplay>(&mut self, panel: &mut P, display: &mut D) {
        let switches = panel.read_switches();
        let buttons = panel.read_buttons();
        let frame = self.step(buttons, switches);
        display.render(&frame);
    }

    /// Runs the control loop forever.
    pub fn run<P: InputPanel, D: SegmentDisplay>(&mut self, panel: &mut P, display: &mut D) -> ! {
        loop {
            self.poll(panel, display);
        }
    }

    /// Applies this iteration's events to the current mode.
    ///
    /// Events that the current mode or its guards do not accept are
    /// dropped without effect.
    pub fn handle(&mut self, events: &[ButtonEvent], switches: Switches) {
        let pressed = |e: ButtonEvent| events.contains(&e);

        match self.mode {
            Mode::Idle => {
                let pattern = if pressed(ButtonEvent::Right) {
                    Some(Pattern::Random)
                } else if pressed(ButtonEvent::Left) {
                    Some(Pattern::Descending)
                } else {
                    None
                };
                if let Some(pattern) = pattern {
                    self.initialize(pattern, switches);
                    self.enter(Mode::Display);
                }
            }
            Mode::Display => {
                if pressed(ButtonEvent::Right) {
                    self.initialize(Pattern::Random, switches);
                }
                if pressed(ButtonEvent::Left) {
                    self.initialize(Pattern::Descending, switches);
                }
                if self.config.browsable() {
                    let n = self.config.len();
                    if pressed(ButtonEvent::Up) {
                        self.cursor = (self.cursor + 1) % n;
                    }
                    if pressed(ButtonEvent::Down) {
                        self.cursor = if self.cursor == 0 { n - 1 } else { self.cursor - 1 };
                    }
                }
                if pressed(ButtonEvent::Center) && !switches.sort_locked() {
                    self.enter(Mode::Sorting);
                }
            }
            Mode::Sorting => {
                self.run_benchmark();
                self.enter(Mode::MismatchReport);
            }
            Mode::MismatchReport => {
                if pressed(ButtonEvent::Center) {
                    self.enter(Mode::Display);
                }
                if pressed(ButtonEvent::Left) {
                    self.enter(Mode::CycleCount);
                }
            }
            Mode::CycleCount => {
                if pressed(ButtonEvent::Left) {
                    self.enter(Mode::Display);
                }
            }
        }
    }

    /// Derives the display frame from the mode, switches and data.
    ///
    /// Evaluated every iteration, so switch changes show up immediately.
    pub fn frame(&self, switches: Switches) -> Frame {
        match self.mode {
            Mode::Sorting => Frame::BUSY,
            Mode::MismatchReport => Frame::hex16(self.result.mismatch_count as u16),
            Mode::CycleCount => {
                let counter = if switches.hardware_selected() {
                    self.result.hw_cycles
                } else {
                    self.result.sw_cycles
                };
                let mut value = counter as u32;
                if switches.upper_half() {
                    value >>= 16;
                }
                Frame::hex16(value as u16)
            }
            Mode::Idle | Mode::Display => {
                if !self.config.browsable() {
                    return Frame::decimal_pairs(self.config.size_code(), self.config.width());
                }
                let addr = self.cursor as usize;
                let value = if switches.hardware_selected() {
                    self.hw_data[addr]
                } else {
                    self.sw_data[addr]
                };
                Frame::browse(self.cursor, value)
            }
        }
    }

    fn enter(&mut self, mode: Mode) {
        log::info!("State switch: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
    }

    fn initialize(&mut self, pattern: Pattern, switches: Switches) {
        self.config = SortConfig::from_code(switches.size_code());
        self.cursor = 0;
        log::info!(
            "Initializing arrays: N={} w={} bits pattern={}",
            self.config.len(),
            self.config.width(),
            pattern.name()
        );
        pattern::fill(
            pattern,
            &self.config,
            &mut self.lfsr,
            &mut self.sw_data,
            &mut self.hw_data,
        );
    }

    fn run_benchmark(&mut self) {
        let n = self.config.len() as usize;
        self.result = self
            .bench
            .run(&mut self.sw_data[..n], &mut self.hw_data[..n]);
    }
}
