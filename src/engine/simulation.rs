//! Main engine interface.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{Status, Timer, TimerHandle, TICK_INTERVAL_MS};
use crate::circuit::{validate_circuit, ComponentId, Registry};
use crate::error::{Result, SimError};

/// Configuration for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Period of the simulation tick.
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick period.
    ///
    /// The workbench always runs at 50 ms; other values exist for hosts that
    /// drive the engine from their own frame clock.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Running,
}

/// The button-to-LED simulation engine.
///
/// The engine does not own the registry or the timer; both are passed in so
/// that one application context can own all three.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    /// Live tick schedule while Running
    timer: Option<TimerHandle>,
    /// Last pressed value seen per button, for edge-only logging
    observed: HashMap<ComponentId, bool>,
    /// Ticks executed since the last start
    ticks: u64,
}

impl Engine {
    /// Create a new engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the simulation is running.
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Ticks executed since the last successful start.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Validate the circuit and start ticking.
    ///
    /// On any failure the engine stays Idle and no schedule is left behind.
    pub fn start<T: Timer + ?Sized>(&mut self, registry: &Registry, timer: &mut T) -> Result<()> {
        if self.is_running() {
            warn!("simulation already running");
            return Err(SimError::AlreadyRunning);
        }

        if let Err(e) = validate_circuit(registry) {
            warn!(error = %e, "simulation start rejected");
            return Err(e);
        }

        let handle = timer.schedule(self.config.tick_interval)?;
        self.timer = Some(handle);
        self.state = EngineState::Running;
        self.ticks = 0;

        info!(
            interval_ms = self.config.tick_interval.as_millis() as u64,
            "simulation started"
        );
        Ok(())
    }

    /// Stop ticking, switch every LED off and release every button.
    ///
    /// Returns `false` if the engine was already Idle.
    pub fn stop<T: Timer + ?Sized>(&mut self, registry: &mut Registry, timer: &mut T) -> bool {
        if !self.is_running() {
            return false;
        }

        self.state = EngineState::Idle;
        if let Some(handle) = self.timer.take() {
            timer.cancel(handle);
        }

        for led in registry.leds_mut() {
            led.set_on(false);
        }
        for button in registry.buttons_mut() {
            button.set_pressed(false);
        }

        self.observed.clear();
        info!(ticks = self.ticks, "simulation stopped");
        true
    }

    /// Run one update: every LED follows the button's pressed flag.
    ///
    /// Ignored while Idle. Returns whether the tick ran.
    pub fn tick(&mut self, registry: &mut Registry) -> bool {
        if !self.is_running() {
            return false;
        }
        self.ticks = self.ticks.saturating_add(1);

        let inputs: Vec<(ComponentId, u8, bool)> = registry
            .buttons()
            .map(|b| (b.id, b.pin.number(), b.is_pressed()))
            .collect();
        if inputs.is_empty() || registry.led().is_none() {
            return true;
        }

        for &(id, pin, pressed) in &inputs {
            if self.observed.insert(id, pressed) != Some(pressed) {
                debug!(%id, pin, pressed, "button transition");
            }
        }

        // Single button assumption: with several buttons the last one wins.
        if let Some(&(_, _, pressed)) = inputs.last() {
            for led in registry.leds_mut() {
                led.set_on(pressed);
            }
        }

        true
    }

    /// Run `count` ticks that fell due together.
    ///
    /// Inputs cannot change between ticks of one batch, so the first tick
    /// settles every output and the rest are only counted. Returns whether
    /// any tick ran.
    pub fn tick_batch(&mut self, registry: &mut Registry, count: u64) -> bool {
        if count == 0 || !self.tick(registry) {
            return false;
        }
        self.ticks = self.ticks.saturating_add(count - 1);
        true
    }

    /// Summarize the circuit and the engine state.
    pub fn status(&self, registry: &Registry) -> Status {
        Status::capture(registry, self.state)
    }
}
