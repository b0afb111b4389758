//! Application context tying the canvas, the engine and the front end together.
//!
//! A [`Workbench`] owns exactly one [`Registry`], one [`Engine`], one
//! [`Timer`] and one [`Frontend`]. UI handlers call its methods; every
//! outcome is turned into a toast and every mutation into a status refresh.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::circuit::{ComponentId, ComponentKind, Pin, Position, Registry};
use crate::codegen;
use crate::engine::{Engine, EngineConfig, ManualTimer, Status, Timer};
use crate::error::{Result, SimError};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// CSS class name used by the page.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn for_error(error: &SimError) -> Self {
        match error {
            SimError::DuplicateBoard | SimError::PinInUse { .. } | SimError::AlreadyRunning => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// The UI side of the workbench.
pub trait Frontend {
    /// Show a transient notification.
    fn toast(&mut self, toast: &Toast);

    /// The status summary changed.
    fn status_changed(&mut self, status: &Status);

    /// The code panel should show a new sketch.
    ///
    /// Sent after components are added or removed and on every code
    /// request. Pin changes leave the panel alone until the next request.
    fn code_changed(&mut self, _sketch: &str) {}
}

/// A front end that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn toast(&mut self, _toast: &Toast) {}

    fn status_changed(&mut self, _status: &Status) {}
}

/// Registry, engine, timer and front end for one page session.
pub struct Workbench<T: Timer> {
    registry: Registry,
    engine: Engine,
    timer: T,
    frontend: Box<dyn Frontend>,
}

impl<T: Timer> Workbench<T> {
    /// Create an empty workbench.
    pub fn new(timer: T, frontend: Box<dyn Frontend>) -> Self {
        Self::with_config(EngineConfig::default(), timer, frontend)
    }

    /// Create an empty workbench with a custom engine configuration.
    pub fn with_config(config: EngineConfig, timer: T, frontend: Box<dyn Frontend>) -> Self {
        Self {
            registry: Registry::new(),
            engine: Engine::with_config(config),
            timer,
            frontend,
        }
    }

    /// The placed components.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The simulation engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The tick timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Place a component on the canvas.
    pub fn place(&mut self, kind: ComponentKind, position: Position) -> Result<ComponentId> {
        let id = match self.registry.add(kind, position).map(|c| c.id()) {
            Ok(id) => id,
            Err(e) => return Err(self.reject(e)),
        };
        self.refresh();
        self.publish_code();
        self.notify(
            format!("{} added to canvas", kind.palette_name().to_uppercase()),
            Severity::Success,
        );
        Ok(id)
    }

    /// Remove a component. Unknown ids are ignored.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        self.refresh();
        self.publish_code();
        self.notify("Component removed", Severity::Success);
        true
    }

    /// Move an LED or button to another pin.
    pub fn change_pin(&mut self, id: ComponentId, pin: u8) -> Result<()> {
        let result = Pin::new(pin).and_then(|pin| self.registry.set_pin(id, pin));
        if let Err(e) = result {
            return Err(self.reject(e));
        }
        self.notify("Pin changed. Click \"Generate Code\" to update.", Severity::Info);
        self.notify(format!("Pin changed to {pin}"), Severity::Success);
        self.refresh();
        Ok(())
    }

    /// Press or release a button. Allowed whether or not the engine runs.
    pub fn set_pressed(&mut self, id: ComponentId, pressed: bool) -> Result<()> {
        if let Err(e) = self.registry.set_pressed(id, pressed) {
            return Err(self.reject(e));
        }
        self.refresh();
        Ok(())
    }

    /// Drag a component to a new canvas position.
    pub fn move_component(&mut self, id: ComponentId, position: Position) -> Result<()> {
        self.registry.move_to(id, position).map_err(|e| self.reject(e))
    }

    /// Remove every component.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.refresh();
        self.publish_code();
        self.notify("Canvas cleared", Severity::Success);
    }

    /// Validate the circuit and start the simulation.
    pub fn start(&mut self) -> Result<()> {
        if let Err(e) = self.engine.start(&self.registry, &mut self.timer) {
            return Err(self.reject(e));
        }
        self.notify("Simulation started successfully!", Severity::Success);
        self.refresh();
        Ok(())
    }

    /// Stop the simulation. Returns `false` if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.engine.stop(&mut self.registry, &mut self.timer) {
            return false;
        }
        self.notify("Simulation stopped", Severity::Success);
        self.refresh();
        true
    }

    /// Timer callback: run one engine tick and refresh the status.
    pub fn tick(&mut self) -> bool {
        let ran = self.engine.tick(&mut self.registry);
        if ran {
            self.refresh();
        }
        ran
    }

    /// Current status summary.
    pub fn status(&self) -> Status {
        self.engine.status(&self.registry)
    }

    /// Generate the sketch for the current circuit.
    pub fn generate_code(&mut self) -> String {
        let sketch = codegen::generate_sketch(&self.registry);
        self.frontend.code_changed(&sketch);
        self.notify("Code generated!", Severity::Success);
        sketch
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let toast = Toast::new(message, severity);
        debug!(severity = %toast.severity, message = %toast.message, "toast");
        self.frontend.toast(&toast);
    }

    fn reject(&mut self, error: SimError) -> SimError {
        self.notify(error.to_string(), Severity::for_error(&error));
        error
    }

    fn refresh(&mut self) {
        let status = self.status();
        self.frontend.status_changed(&status);
    }

    fn publish_code(&mut self) {
        let sketch = codegen::generate_sketch(&self.registry);
        self.frontend.code_changed(&sketch);
    }
}

impl Workbench<ManualTimer> {
    /// Create a workbench driven by a [`ManualTimer`].
    pub fn manual(frontend: Box<dyn Frontend>) -> Self {
        Self::new(ManualTimer::new(), frontend)
    }

    /// Let `elapsed` pass, running every tick that falls due.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let due = self.timer.advance(elapsed);
        if self.engine.tick_batch(&mut self.registry, due) {
            self.refresh();
        }
        due
    }
}
