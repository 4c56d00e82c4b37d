//! Scripted sessions of the interactive controller.

use crate::rig::{ConsoleDisplay, RigArgs, ScriptedPanel};
use anyhow::Result;
use sortbench_core::controller::Controller;
use sortbench_core::input::InputPanel;
use sortbench_io::{expand, load_script};

/// Plays a script against the controller and prints every frame change.
pub fn run_replay(rig: &RigArgs, script: &str) -> Result<()> {
    let commands = load_script(script)?;
    let frames = expand(&commands);
    println!("Replaying {} ({} iterations)", script, frames.len());

    // The arrays are 32 KiB; keep them off the stack.
    let mut ctrl = Box::new(Controller::new(rig.build()?));
    let mut panel = ScriptedPanel::new(frames);
    let mut display = ConsoleDisplay::default();

    ctrl.prime(panel.read_buttons());
    while panel.advance() {
        ctrl.poll(&mut panel, &mut display);
    }

    println!("Final mode: {} after {} iterations", ctrl.mode().name(), panel.position());
    let result = ctrl.result();
    if result.sw_cycles != 0 || result.hw_cycles != 0 {
        println!(
            "Last run: sw {} ticks, hw {} ticks, speedup {:.2} %, {} mismatches",
            result.sw_cycles,
            result.hw_cycles,
            result.speedup_percent(),
            result.mismatch_count
        );
    }
    if let Some(fault) = ctrl.fault() {
        println!("Fault: {}", fault);
    }
    Ok(())
}
