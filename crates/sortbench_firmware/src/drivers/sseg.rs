//! Eight-digit seven-segment display core.
//!
//! Digits 0..3 live in the low data register, one byte each, and digits
//! 4..7 in the high one. Only the right four digits are used; the left
//! four are blanked.

use sortbench_core::bus::{MmioBus, RegisterBus};
use sortbench_core::display::{BLANK_SEGMENTS, Frame, SegmentDisplay};

const DATA_LOW_REG: u32 = 0;
const DATA_HIGH_REG: u32 = 1;

pub struct SsegDisplay {
    bus: MmioBus,
}

impl SsegDisplay {
    /// Blanks all eight digits.
    pub fn new(mut bus: MmioBus) -> Self {
        let blank = u32::from_ne_bytes([BLANK_SEGMENTS; 4]);
        bus.write(DATA_LOW_REG, blank);
        bus.write(DATA_HIGH_REG, blank);
        Self { bus }
    }
}

impl SegmentDisplay for SsegDisplay {
    fn render(&mut self, frame: &Frame) {
        self.bus.write(DATA_LOW_REG, frame.segment_word());
    }
}
