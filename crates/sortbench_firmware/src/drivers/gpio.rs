//! Switch and push-button inputs.

use sortbench_core::bus::{MmioBus, RegisterBus};
use sortbench_core::input::InputPanel;

const DATA_REG: u32 = 0;

/// Debounced levels of the debounce core.
const DB_REG: u32 = 1;

/// Slide switches (general-purpose input core) and push buttons (debounce
/// core) seen as one panel.
pub struct Panel {
    switches: MmioBus,
    buttons: MmioBus,
}

impl Panel {
    pub fn new(switches: MmioBus, buttons: MmioBus) -> Self {
        Self { switches, buttons }
    }
}

impl InputPanel for Panel {
    fn read_buttons(&mut self) -> u32 {
        self.buttons.read(DB_REG)
    }

    fn read_switches(&mut self) -> u16 {
        self.switches.read(DATA_REG) as u16
    }
}
