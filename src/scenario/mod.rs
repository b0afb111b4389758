//! Scenario scripts for driving a workbench without a browser.
//!
//! A scenario replays UI events line by line. Time only moves on `wait`,
//! so a run is fully deterministic.
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `place <board\|led\|button> [x y]` | Drop a component on the canvas |
//! | `remove <id>` | Delete a component |
//! | `pin <id> <n>` | Move an LED or button to pin `n` (2-13) |
//! | `press <id>` / `release <id>` | Hold or let go of a button |
//! | `move <id> <x> <y>` | Drag a component |
//! | `clear` | Remove everything |
//! | `start` / `stop` | Control the simulation |
//! | `wait <duration>` | Let time pass (`120ms`, `1s`, or bare milliseconds) |
//! | `tick` | Run one engine tick immediately |
//! | `status` | Print the status panel |
//! | `code` | Print the generated sketch |
//!
//! Ids are assigned from 0 in placement order and may be written `3` or `#3`.
//! `#` at the start of a line and `;` anywhere begin a comment.
//!
//! # Example
//!
//! ```text
//! place board
//! place led         # id 1, pin 10
//! place button      # id 2, pin 2
//! start
//! press 2
//! wait 60ms
//! status
//! stop
//! ```

mod ast;
mod parser;

pub use ast::{Command, Script, Step};
pub use parser::Parser;

use std::io::Write;

use tracing::{debug, info};

use crate::engine::ManualTimer;
use crate::error::{Result, SimError};
use crate::workbench::Workbench;

/// Parse a scenario string.
pub fn parse(input: &str) -> Result<Script> {
    Parser::new(input).parse()
}

/// Parse a scenario file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Script> {
    let content = std::fs::read_to_string(path).map_err(|e| SimError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Outcome of running a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed
    pub executed: usize,
    /// Commands the workbench rejected
    pub rejected: usize,
    /// Engine ticks fired by `wait` and `tick`
    pub ticks: u64,
}

/// Run a script against a workbench.
///
/// Rejected commands are reported through the workbench's front end and the
/// run continues. Only output failures abort the run.
pub fn run(script: &Script, workbench: &mut Workbench<ManualTimer>, out: &mut dyn Write) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for step in &script.commands {
        debug!(line = step.line, command = ?step.command, "scenario step");
        summary.executed += 1;

        let outcome = match &step.command {
            Command::Place { kind, position } => workbench.place(*kind, *position).map(|_| ()),
            Command::Remove(id) => {
                workbench.remove(*id);
                Ok(())
            }
            Command::Pin { id, pin } => workbench.change_pin(*id, *pin),
            Command::Press(id) => workbench.set_pressed(*id, true),
            Command::Release(id) => workbench.set_pressed(*id, false),
            Command::Move { id, position } => workbench.move_component(*id, *position),
            Command::Clear => {
                workbench.clear();
                Ok(())
            }
            Command::Start => workbench.start(),
            Command::Stop => {
                workbench.stop();
                Ok(())
            }
            Command::Wait(elapsed) => {
                summary.ticks = summary.ticks.saturating_add(workbench.advance(*elapsed));
                Ok(())
            }
            Command::Tick => {
                if workbench.tick() {
                    summary.ticks += 1;
                }
                Ok(())
            }
            Command::Status => {
                write_block(out, &workbench.status().to_string())?;
                Ok(())
            }
            Command::Code => {
                let sketch = workbench.generate_code();
                write_block(out, &sketch)?;
                Ok(())
            }
        };

        if outcome.is_err() {
            summary.rejected += 1;
        }
    }

    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        ticks = summary.ticks,
        "scenario finished"
    );
    Ok(summary)
}

fn write_block(out: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(out, "{text}").map_err(|e| SimError::OutputError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbench::NullFrontend;

    fn run_str(input: &str) -> (Workbench<ManualTimer>, RunSummary, String) {
        let script = parse(input).unwrap();
        let mut wb = Workbench::manual(Box::new(NullFrontend));
        let mut out = Vec::new();
        let summary = run(&script, &mut wb, &mut out).unwrap();
        (wb, summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_press_and_wait() {
        let (wb, summary, out) = run_str(
            "place board\nplace led\nplace button\nstart\npress 2\nwait 120ms\nstatus\n",
        );
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.ticks, 2);
        assert!(wb.registry().led().unwrap().on);
        assert!(out.contains("✓ LED on Pin 10 - ON"));
        assert!(out.contains("▶ Simulation Active"));
    }

    #[test]
    fn test_rejected_commands_do_not_abort() {
        let (wb, summary, _) = run_str("start\nplace board\nplace board\npin 7 3\nplace led\n");
        assert_eq!(summary.executed, 5);
        assert_eq!(summary.rejected, 3);
        assert_eq!(wb.registry().len(), 2);
    }

    #[test]
    fn test_code_output() {
        let (_, _, out) = run_str("place board\nplace led\nplace button\npin 1 9\ncode\n");
        assert!(out.contains("const int LED_PIN = 9;"));
        assert!(out.contains("const int BUTTON_PIN = 2;"));
    }
}
