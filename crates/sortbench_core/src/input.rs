//! Button edge detection and switch decoding.
//!
//! Buttons arrive as debounced levels. A press is reported once, on the
//! rising edge, no matter how many loop iterations the button stays down.
//! Switches are levels and are used as sampled, with no edge detection.

use crate::static_vec::StaticVec;
use sortbench_common::buttons::{BTN_ALL, BTN_CENTER, BTN_DOWN, BTN_LEFT, BTN_RIGHT, BTN_UP};
use sortbench_common::switches::{HW_SELECT, SIZE_CODE_MASK, SORT_LOCK, UPPER_HALF};

/// Source of raw input levels, sampled once per control-loop iteration.
pub trait InputPanel {
    /// Debounced button levels, one bit per button.
    fn read_buttons(&mut self) -> u32;

    /// Current switch levels.
    fn read_switches(&mut self) -> u16;
}

/// A single logical button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Right,
    Left,
    Up,
    Down,
    Center,
}

impl ButtonEvent {
    /// All events in the order the controller handles them within one
    /// iteration.
    pub const ORDER: [ButtonEvent; 5] = [
        ButtonEvent::Right,
        ButtonEvent::Left,
        ButtonEvent::Up,
        ButtonEvent::Down,
        ButtonEvent::Center,
    ];

    pub fn mask(&self) -> u32 {
        match self {
            ButtonEvent::Up => BTN_UP,
            ButtonEvent::Right => BTN_RIGHT,
            ButtonEvent::Down => BTN_DOWN,
            ButtonEvent::Left => BTN_LEFT,
            ButtonEvent::Center => BTN_CENTER,
        }
    }
}

/// Events produced by one iteration, in handling order.
pub type EventQueue = StaticVec<ButtonEvent, 5>;

/// Turns button levels into rising-edge events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: u32,
}

impl EdgeDetector {
    /// Creates a detector that treats `initial` as the previous levels.
    ///
    /// Priming with the levels at boot keeps a button that is already held
    /// from registering as a press.
    pub fn new(initial: u32) -> Self {
        Self {
            previous: initial & BTN_ALL,
        }
    }

    /// Returns the bits that went from low to high since the last call.
    pub fn pressed(&mut self, levels: u32) -> u32 {
        let levels = levels & BTN_ALL;
        let rising = (levels ^ self.previous) & levels;
        self.previous = levels;
        rising
    }

    /// Samples `levels` and returns the resulting events in handling order.
    pub fn events(&mut self, levels: u32) -> EventQueue {
        let rising = self.pressed(levels);
        let mut queue = EventQueue::new();
        for event in ButtonEvent::ORDER {
            if rising & event.mask() != 0 {
                let _ = queue.push(event);
            }
        }
        queue
    }
}

/// Decoded view of the switch levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Switches(pub u16);

impl Switches {
    /// Raw size code on switches 3..0, before clamping.
    pub fn size_code(&self) -> u8 {
        (self.0 & SIZE_CODE_MASK) as u8
    }

    /// Sorting is disabled while the lock switch is up.
    pub fn sort_locked(&self) -> bool {
        self.0 & SORT_LOCK != 0
    }

    /// Show the upper half of the selected cycle counter.
    pub fn upper_half(&self) -> bool {
        self.0 & UPPER_HALF != 0
    }

    /// Select the hardware array or the hardware counter.
    pub fn hardware_selected(&self) -> bool {
        self.0 & HW_SELECT != 0
    }
}
