//! Array size and element width selection.

use sortbench_common::limits::{
    MAX_BROWSE_ELEMENTS, MAX_SIZE_CODE, MIN_SIZE_CODE, WIDE_SIZE_CODE,
};
use sortbench_common::switches::SIZE_CODE_MASK;

/// Size and width of one benchmark run, derived from a 4-bit size code.
///
/// The code k is clamped into `[4, 13]` so that malformed switch input can
/// never select an array larger than the buffers or smaller than the
/// display expects. N is `2^k`; elements are 8 bits wide for k < 9 and
/// 16 bits wide otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    k: u8,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { k: MIN_SIZE_CODE }
    }
}

impl SortConfig {
    /// Builds a configuration from a raw size code, clamping it into range.
    pub fn from_code(code: u8) -> Self {
        Self {
            k: code.clamp(MIN_SIZE_CODE, MAX_SIZE_CODE),
        }
    }

    /// Builds a configuration from the switch levels (switches 3..0).
    pub fn from_switches(levels: u16) -> Self {
        Self::from_code((levels & SIZE_CODE_MASK) as u8)
    }

    /// log2 of the element count.
    pub fn size_code(&self) -> u8 {
        self.k
    }

    /// Number of elements N.
    pub fn len(&self) -> u16 {
        1 << self.k
    }

    /// Element width w in bits, either 8 or 16.
    pub fn width(&self) -> u8 {
        if self.k < WIDE_SIZE_CODE { 8 } else { 16 }
    }

    /// Mask that keeps a value within `width()` bits.
    pub fn value_mask(&self) -> u16 {
        if self.width() == 8 { 0x00FF } else { 0xFFFF }
    }

    /// Whether the array is small enough to browse element by element.
    pub fn browsable(&self) -> bool {
        self.len() <= MAX_BROWSE_ELEMENTS
    }
}
