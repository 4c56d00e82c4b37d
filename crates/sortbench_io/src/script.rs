//! Parser for scripted input sessions.
//!
//! A script replaces the physical buttons and switches when the controller
//! runs on a host. Each non-empty line holds one command; `#` starts a
//! comment.
//!
//! ```text
//! switches 0x0004     # k = 4
//! press left          # descending init
//! press up+up         # same button twice is one press
//! hold center
//! step 3
//! release center
//! ```

use anyhow::{Context, Result, anyhow};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{char, digit1, hex_digit1, space1};
use nom::combinator::{all_consuming, map, map_res, value, verify};
use nom::multi::separated_list1;
use nom::sequence::preceded;
use sortbench_common::buttons::{BTN_CENTER, BTN_DOWN, BTN_LEFT, BTN_RIGHT, BTN_UP};
use std::fs;
use std::path::Path;

/// Largest iteration count a single `step` command may request.
pub const MAX_STEP_COUNT: u32 = 100_000;

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set all switch levels.
    Switches(u16),
    /// Press and release the buttons in the mask.
    Press(u32),
    /// Press the buttons in the mask and keep them down.
    Hold(u32),
    /// Release the buttons in the mask.
    Release(u32),
    /// Run iterations with the current levels unchanged, at most
    /// [`MAX_STEP_COUNT`].
    Step(u32),
}

/// Input levels for one control-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub buttons: u32,
    pub switches: u16,
}

fn button(i: &str) -> IResult<&str, u32> {
    alt((
        value(BTN_UP, tag("up")),
        value(BTN_DOWN, tag("down")),
        value(BTN_LEFT, tag("left")),
        value(BTN_RIGHT, tag("right")),
        value(BTN_CENTER, tag("center")),
    ))(i)
}

fn buttons(i: &str) -> IResult<&str, u32> {
    map(separated_list1(char('+'), button), |list| {
        list.into_iter().fold(0, |mask, b| mask | b)
    })(i)
}

fn switch_levels(i: &str) -> IResult<&str, u16> {
    alt((
        map_res(preceded(tag_no_case("0x"), hex_digit1), |s| {
            u16::from_str_radix(s, 16)
        }),
        map_res(digit1, str::parse::<u16>),
    ))(i)
}

fn count(i: &str) -> IResult<&str, u32> {
    verify(map_res(digit1, str::parse::<u32>), |&n| n <= MAX_STEP_COUNT)(i)
}

fn command(i: &str) -> IResult<&str, Command> {
    alt((
        map(preceded(tag("switches"), preceded(space1, switch_levels)), Command::Switches),
        map(preceded(tag("press"), preceded(space1, buttons)), Command::Press),
        map(preceded(tag("hold"), preceded(space1, buttons)), Command::Hold),
        map(preceded(tag("release"), preceded(space1, buttons)), Command::Release),
        map(preceded(tag("step"), preceded(space1, count)), Command::Step),
    ))(i)
}

/// Parses script text into commands.
///
/// # Returns
///
/// The commands in file order, or an error naming the first line that
/// does not parse.
pub fn parse_script(src: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (_, cmd) = all_consuming(command)(line)
            .map_err(|_| anyhow!("line {}: cannot parse `{}`", idx + 1, line))?;
        commands.push(cmd);
    }
    Ok(commands)
}

/// Reads and parses a script file.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)
        .with_context(|| format!("Failed to open script {}", path.display()))?;
    parse_script(&src).with_context(|| format!("Invalid script {}", path.display()))
}

/// Expands commands into per-iteration input levels.
///
/// A press occupies two iterations: one with the buttons down and one with
/// them released, so that each press produces exactly one rising edge.
/// Changing the switches, holding and releasing each take one iteration.
pub fn expand(commands: &[Command]) -> Vec<InputFrame> {
    let mut frames = Vec::new();
    let mut held = 0u32;
    let mut switches = 0u16;

    for cmd in commands {
        match *cmd {
            Command::Switches(levels) => {
                switches = levels;
                frames.push(InputFrame { buttons: held, switches });
            }
            Command::Press(mask) => {
                frames.push(InputFrame {
                    buttons: held | mask,
                    switches,
                });
                frames.push(InputFrame { buttons: held, switches });
            }
            Command::Hold(mask) => {
                held |= mask;
                frames.push(InputFrame { buttons: held, switches });
            }
            Command::Release(mask) => {
                held &= !mask;
                frames.push(InputFrame { buttons: held, switches });
            }
            Command::Step(n) => {
                for _ in 0..n {
                    frames.push(InputFrame { buttons: held, switches });
                }
            }
        }
    }
    frames
}
