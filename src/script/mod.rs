//! Line-oriented tracker commands, shared by the console's command mode and
//! headless replay.

mod command;

pub use command::{parse_command, Command, Expectation, ScriptError};

use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::tracker::WizardTracker;

/// Outcome of a finished replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayReport {
    /// Commands applied, comments and blank lines excluded
    pub commands: usize,
    /// Set when the script ended with `quit`
    pub quit: bool,
}

/// Apply every command in `script` to `tracker`, writing a summary line to
/// `out` for each `status`. Stops at the first error, tagged with its line.
pub fn replay<W: Write>(tracker: &mut WizardTracker, script: &str, out: &mut W) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (idx, line) in script.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = parse_command(line).map_err(|e| e.at_line(line_no))?;
        debug!("Replaying line {}: {:?}", line_no, command);

        match command {
            Command::Quit => {
                report.quit = true;
                break;
            }
            Command::Status => {
                writeln!(out, "{}", tracker.summary())?;
            }
            command => command.apply(tracker).map_err(|e| e.at_line(line_no))?,
        }
        report.commands += 1;
    }

    Ok(report)
}
