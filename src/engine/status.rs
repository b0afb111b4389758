//! Status summary shown next to the canvas.

use std::fmt;

use super::EngineState;
use crate::circuit::{ComponentKind, Pin, Registry};

/// LED line of the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedStatus {
    pub pin: Pin,
    pub on: bool,
}

/// Button line of the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStatus {
    pub pin: Pin,
    pub pressed: bool,
}

/// Snapshot of the circuit and engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub board: bool,
    pub led: Option<LedStatus>,
    pub button: Option<ButtonStatus>,
    pub state: EngineState,
}

const ACTIVE_COLOR: &str = "#51cf66";
const IDLE_COLOR: &str = "#868e96";

impl Status {
    /// Capture the status of the first board, LED and button.
    pub fn capture(registry: &Registry, state: EngineState) -> Self {
        Self {
            board: registry.find(ComponentKind::Board).is_some(),
            led: registry.led().map(|l| LedStatus {
                pin: l.pin,
                on: l.is_on(),
            }),
            button: registry.button().map(|b| ButtonStatus {
                pin: b.pin,
                pressed: b.pressed,
            }),
            state,
        }
    }

    /// Render the status panel as HTML markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();

        if self.board {
            out.push_str("<p><strong>✓ Arduino Uno</strong> added</p>");
        } else {
            out.push_str("<p><strong>✗ Arduino Uno</strong> required</p>");
        }

        match self.led {
            Some(led) => {
                let state = highlight(led.on, "ON", "OFF");
                out.push_str(&format!("<p><strong>✓ LED</strong> on Pin {} - {state}</p>", led.pin));
            }
            None => out.push_str("<p><strong>✗ LED</strong> required</p>"),
        }

        match self.button {
            Some(button) => {
                let state = highlight(button.pressed, "PRESSED", "RELEASED");
                out.push_str(&format!(
                    "<p><strong>✓ Button</strong> on Pin {} - {state}</p>",
                    button.pin
                ));
            }
            None => out.push_str("<p><strong>✗ Button</strong> required</p>"),
        }

        match self.state {
            EngineState::Running => out.push_str(&format!(
                "<p style=\"color: {ACTIVE_COLOR};\"><strong>▶ Simulation Active</strong></p>"
            )),
            EngineState::Idle => out.push_str(&format!(
                "<p style=\"color: {IDLE_COLOR};\">■ Simulation Idle</p>"
            )),
        }

        out
    }
}

fn highlight(active: bool, on_text: &str, off_text: &str) -> String {
    if active {
        format!("<span style=\"color:{ACTIVE_COLOR}; font-weight:bold;\">{on_text}</span>")
    } else {
        format!("<span style=\"color:{IDLE_COLOR};\">{off_text}</span>")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.board {
            writeln!(f, "✓ Arduino Uno added")?;
        } else {
            writeln!(f, "✗ Arduino Uno required")?;
        }

        match self.led {
            Some(led) => writeln!(f, "✓ LED on Pin {} - {}", led.pin, if led.on { "ON" } else { "OFF" })?,
            None => writeln!(f, "✗ LED required")?,
        }

        match self.button {
            Some(button) => writeln!(
                f,
                "✓ Button on Pin {} - {}",
                button.pin,
                if button.pressed { "PRESSED" } else { "RELEASED" }
            )?,
            None => writeln!(f, "✗ Button required")?,
        }

        match self.state {
            EngineState::Running => write!(f, "▶ Simulation Active"),
            EngineState::Idle => write!(f, "■ Simulation Idle"),
        }
    }
}
