//! Simulation engine.
//!
//! The engine is a two-state machine (Idle, Running). Starting it passes the
//! circuit through [`validate_circuit`](crate::circuit::validate_circuit)
//! and schedules a repeating tick on a [`Timer`]. Each tick copies the push
//! button's pressed flag onto the LEDs:
//!
//! ```text
//!          start() [valid]            tick(): led.on := button.pressed
//!   Idle ─────────────────▶ Running ◀──┐
//!    ▲                        │  └─────┘
//!    └────────── stop() ──────┘  (LEDs off, buttons released)
//! ```
//!
//! The mapping assumes exactly one LED and one button. Extra LEDs all follow
//! the buttons; with several buttons the last one placed wins.

mod simulation;
mod status;
mod timer;

pub use simulation::{Engine, EngineConfig, EngineState};
pub use status::{ButtonStatus, LedStatus, Status};
pub use timer::{ManualTimer, Timer, TimerHandle};

/// Tick period of the simulation loop in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;
