//! Error types for the Pinsim workbench.
//!
//! This module provides a unified error type [`SimError`] that covers
//! every rejected action: component placement, pin assignment, simulation
//! start, scenario parsing, and timer scheduling.
//!
//! None of these errors are fatal. The workbench reports each one to the
//! user as a toast and the action can simply be retried.

use thiserror::Error;

use crate::circuit::ComponentId;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all Pinsim operations.
#[derive(Error, Debug)]
pub enum SimError {
    // ============ Registry Errors ============
    /// A second board was placed
    #[error("Only one Arduino Uno allowed!")]
    DuplicateBoard,

    /// Pin already held by another LED or button
    #[error("Pin already in use!")]
    PinInUse { pin: u8, holder: ComponentId },

    /// Pin number outside the digital range
    #[error("Pin {pin} is not available (use digital pins 2-13)")]
    InvalidPin { pin: u8 },

    /// Every digital pin is already assigned
    #[error("No free pin left for a new {kind}")]
    NoFreePin { kind: String },

    /// No component with this id
    #[error("Component {id} not found")]
    ComponentNotFound { id: ComponentId },

    /// Pin operation on a component without a pin
    #[error("{kind} has no configurable pin")]
    NoPinOnComponent { kind: String },

    /// Press/release on something other than a button
    #[error("Component {id} is not a push button")]
    NotAButton { id: ComponentId },

    // ============ Validation Errors ============
    /// No board on the canvas
    #[error("Please add Arduino Uno to the canvas!")]
    MissingBoard,

    /// No LED on the canvas
    #[error("Please add an LED to the canvas!")]
    MissingLed,

    /// No button on the canvas
    #[error("Please add a Push Button to the canvas!")]
    MissingButton,

    /// LED and button wired to the same pin
    #[error("LED and Button cannot share the same pin!")]
    PinConflict { pin: u8 },

    // ============ Engine Errors ============
    /// Start requested while the simulation is running
    #[error("Simulation already running")]
    AlreadyRunning,

    /// The periodic tick could not be scheduled
    #[error("Failed to schedule simulation timer: {message}")]
    Timer { message: String },

    // ============ Scenario Errors ============
    /// Error while parsing a scenario script
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a scenario script
    #[error("Failed to read scenario file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing scenario output
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl SimError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a timer error
    pub fn timer(message: impl Into<String>) -> Self {
        Self::Timer {
            message: message.into(),
        }
    }

    /// Whether this error came from the circuit validation gate in front of `start`.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingBoard | Self::MissingLed | Self::MissingButton | Self::PinConflict { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_workbench_wording() {
        assert_eq!(SimError::DuplicateBoard.to_string(), "Only one Arduino Uno allowed!");
        assert_eq!(
            SimError::PinInUse { pin: 4, holder: ComponentId(1) }.to_string(),
            "Pin already in use!"
        );
        assert_eq!(
            SimError::parse(7, "unknown command 'jump'").to_string(),
            "Parse error at line 7: unknown command 'jump'"
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(SimError::MissingBoard.is_validation());
        assert!(SimError::PinConflict { pin: 2 }.is_validation());
        assert!(!SimError::AlreadyRunning.is_validation());
        assert!(!SimError::DuplicateBoard.is_validation());
    }
}
