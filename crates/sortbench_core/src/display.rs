//! Four-digit display frames.
//!
//! The controller describes what should be shown as a [`Frame`] of four
//! glyphs. Turning glyphs into segment patterns is left to the display
//! driver.

use core::fmt;

/// Content of one display digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A hexadecimal digit, 0..=15.
    Hex(u8),
    /// The busy marker, a single horizontal bar.
    Dash,
}

/// Active-low segment patterns for the hex digits, bit 7 is the
/// decimal point.
const HEX_SEGMENTS: [u8; 16] = [
    0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90, 0x88, 0x83, 0xC6, 0xA1, 0x86, 0x8E,
];

const DASH_SEGMENTS: u8 = 0xBF;

/// All segments off.
pub const BLANK_SEGMENTS: u8 = 0xFF;

impl Glyph {
    /// Active-low seven-segment pattern with the decimal point off.
    pub fn segments(&self) -> u8 {
        match *self {
            Glyph::Hex(d) => HEX_SEGMENTS[(d & 0xF) as usize],
            Glyph::Dash => DASH_SEGMENTS,
        }
    }
}

/// Four digits; index 0 is the rightmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(pub [Glyph; 4]);

impl Frame {
    /// `----`, shown while a sort is in progress.
    pub const BUSY: Frame = Frame([Glyph::Dash; 4]);

    /// A 16-bit value in hexadecimal.
    pub fn hex16(value: u16) -> Self {
        Frame(core::array::from_fn(|i| {
            Glyph::Hex(((value >> (i * 4)) & 0xF) as u8)
        }))
    }

    /// Two decimal pairs, `hi` on the left two digits and `lo` on the
    /// right two. Each pair shows its value modulo 100.
    pub fn decimal_pairs(hi: u8, lo: u8) -> Self {
        Frame([
            Glyph::Hex(lo % 10),
            Glyph::Hex(lo / 10 % 10),
            Glyph::Hex(hi % 10),
            Glyph::Hex(hi / 10 % 10),
        ])
    }

    /// Browse address on the left two digits, the low byte of the element
    /// on the right two.
    pub fn browse(address: u16, value: u16) -> Self {
        Frame([
            Glyph::Hex((value & 0xF) as u8),
            Glyph::Hex(((value >> 4) & 0xF) as u8),
            Glyph::Hex((address & 0xF) as u8),
            Glyph::Hex(((address >> 4) & 0xF) as u8),
        ])
    }

    /// Segment patterns of all four digits packed into one word, digit 0
    /// in the low byte.
    pub fn segment_word(&self) -> u32 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |word, (i, g)| word | (g.segments() as u32) << (8 * i))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in self.0.iter().rev() {
            match glyph {
                Glyph::Hex(d) => write!(f, "{:X}", d)?,
                Glyph::Dash => f.write_str("-")?,
            }
        }
        Ok(())
    }
}

/// Sink for rendered frames.
pub trait SegmentDisplay {
    fn render(&mut self, frame: &Frame);
}
