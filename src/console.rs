//! Terminal front end for the CLI.
//!
//! Prints toasts as they arrive and reports LED transitions from status
//! refreshes, so a scenario run reads like the browser session it replays.

use std::io::{self, Write};

use crate::engine::Status;
use crate::workbench::{Frontend, Severity, Toast};

/// A [`Frontend`] writing to stdout.
#[derive(Debug, Default)]
pub struct ConsoleFrontend {
    /// Last LED state reported, to print only transitions
    led_on: Option<bool>,
    /// Suppress success/info toasts
    quiet: bool,
}

impl ConsoleFrontend {
    /// Create a console front end.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only print warnings and errors.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn toast_line(&self, toast: &Toast) -> Option<String> {
        if self.quiet && matches!(toast.severity, Severity::Success | Severity::Info) {
            return None;
        }
        Some(format!("[{}] {}", toast.severity, toast.message))
    }

    /// Line for an LED transition. The first LED seen only sets the baseline.
    fn led_line(&mut self, status: &Status) -> Option<String> {
        let led_on = status.led.map(|led| led.on);
        if led_on == self.led_on {
            return None;
        }
        let seen = self.led_on.is_some();
        self.led_on = led_on;

        let led = status.led.filter(|_| seen)?;
        Some(format!("LED on pin {} {}", led.pin, if led.on { "ON" } else { "OFF" }))
    }

    fn emit(&self, line: &str) {
        // A closed stdout only loses notifications; the run itself goes on.
        let _ = writeln!(io::stdout().lock(), "{line}");
    }
}

impl Frontend for ConsoleFrontend {
    fn toast(&mut self, toast: &Toast) {
        if let Some(line) = self.toast_line(toast) {
            self.emit(&line);
        }
    }

    fn status_changed(&mut self, status: &Status) {
        if let Some(line) = self.led_line(status) {
            self.emit(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Pin;
    use crate::engine::{EngineState, LedStatus};

    fn with_led(on: Option<bool>) -> Status {
        Status {
            board: true,
            led: on.map(|on| LedStatus {
                pin: Pin::DEFAULT_LED,
                on,
            }),
            button: None,
            state: EngineState::Running,
        }
    }

    #[test]
    fn test_toast_lines() {
        let console = ConsoleFrontend::new();
        assert_eq!(
            console.toast_line(&Toast::new("LED added to canvas", Severity::Success)),
            Some("[success] LED added to canvas".to_string())
        );
        assert_eq!(
            console.toast_line(&Toast::new("Pin already in use!", Severity::Warning)),
            Some("[warning] Pin already in use!".to_string())
        );
    }

    #[test]
    fn test_quiet_keeps_only_warnings_and_errors() {
        let console = ConsoleFrontend::new().quiet(true);
        assert_eq!(console.toast_line(&Toast::new("Canvas cleared", Severity::Success)), None);
        assert_eq!(console.toast_line(&Toast::new("Pin changed", Severity::Info)), None);
        assert!(console
            .toast_line(&Toast::new("Only one Arduino Uno allowed!", Severity::Warning))
            .is_some());
        assert_eq!(
            console.toast_line(&Toast::new("Please add an LED to the canvas!", Severity::Error)),
            Some("[error] Please add an LED to the canvas!".to_string())
        );
    }

    #[test]
    fn test_led_transitions_only() {
        let mut console = ConsoleFrontend::new();

        // No LED, then the first LED: baseline only
        assert_eq!(console.led_line(&with_led(None)), None);
        assert_eq!(console.led_line(&with_led(Some(false))), None);

        assert_eq!(
            console.led_line(&with_led(Some(true))),
            Some("LED on pin 10 ON".to_string())
        );
        assert_eq!(console.led_line(&with_led(Some(true))), None);
        assert_eq!(
            console.led_line(&with_led(Some(false))),
            Some("LED on pin 10 OFF".to_string())
        );

        // Removing the LED is silent and resets the baseline
        assert_eq!(console.led_line(&with_led(None)), None);
        assert_eq!(console.led_line(&with_led(Some(true))), None);
    }
}
