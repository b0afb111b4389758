//! Parsed scenario commands.

use std::time::Duration;

use crate::circuit::{ComponentId, ComponentKind, Position};

/// A parsed scenario script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Commands in file order
    pub commands: Vec<Step>,
}

impl Script {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A command plus the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub command: Command,
    /// Source line number for error reporting
    pub line: usize,
}

/// One UI event replayed against the workbench.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Place {
        kind: ComponentKind,
        position: Position,
    },
    Remove(ComponentId),
    Pin {
        id: ComponentId,
        pin: u8,
    },
    Press(ComponentId),
    Release(ComponentId),
    Move {
        id: ComponentId,
        position: Position,
    },
    Clear,
    Start,
    Stop,
    /// Let time pass; due ticks fire
    Wait(Duration),
    /// Force a single tick regardless of the timer
    Tick,
    /// Print the status panel
    Status,
    /// Print the generated sketch
    Code,
}
