//! File formats used by the host-side tools.
//!
//! Input scripts drive the benchmark controller without a board: they
//! describe switch settings and button presses, which are expanded into the
//! per-iteration levels the controller samples.

/// Parser and expander for input scripts.
///
/// Scripts are line-oriented text files. Parsing reports the first bad line
/// by number; expansion turns the command list into one input frame per
/// control-loop iteration.
pub mod script;

pub use script::{Command, InputFrame, MAX_STEP_COUNT, expand, load_script, parse_script};
