//! Test data generation for both sort paths.

use crate::config::SortConfig;
use sortbench_common::limits::LFSR_SEED;

/// 16-bit Fibonacci linear-feedback shift register.
///
/// Feedback taps are bits 0, 2, 3 and 5. The state shifts right and the
/// feedback bit enters at bit 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(LFSR_SEED)
    }
}

impl Lfsr {
    /// Creates a generator. A zero seed locks the register at zero.
    pub const fn new(seed: u16) -> Self {
        Self { state: seed }
    }

    /// Advances the register and returns the new state.
    pub fn next_value(&mut self) -> u16 {
        let s = self.state;
        let bit = (s ^ (s >> 2) ^ (s >> 3) ^ (s >> 5)) & 1;
        self.state = (s >> 1) | (bit << 15);
        self.state
    }
}

/// Contents used to initialize the arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Successive LFSR outputs.
    Random,
    /// `N - 1 - i`, the worst case for a selection sort.
    Descending,
}

impl Pattern {
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Random => "pseudo-random (LFSR)",
            Pattern::Descending => "descending",
        }
    }
}

/// Fills the first N slots of both arrays with identical values.
///
/// Values are masked to the configured element width. The generator is
/// only advanced for [`Pattern::Random`].
///
/// # Panics
///
/// Panics if either array is shorter than N.
pub fn fill(
    pattern: Pattern,
    config: &SortConfig,
    lfsr: &mut Lfsr,
    sw_data: &mut [u16],
    hw_data: &mut [u16],
) {
    let n = config.len() as usize;
    let mask = config.value_mask();

    for (i, (sw, hw)) in sw_data[..n].iter_mut().zip(&mut hw_data[..n]).enumerate() {
        let value = match pattern {
            Pattern::Random => lfsr.next_value(),
            Pattern::Descending => (n - 1 - i) as u16,
        };
        *sw = value & mask;
        *hw = value & mask;
    }
}
