//! # Pinsim Core
//!
//! A workbench simulator for a microcontroller board, an LED and a push
//! button.
//!
//! This library provides:
//! - A component registry enforcing one board and unique pins
//! - A two-state simulation engine where the button drives the LED
//! - A status summary and an Arduino sketch generator
//! - Scenario scripts for replaying UI sessions from the command line
//!
//! ## Architecture
//!
//! - [`circuit`] - Component registry and circuit validation
//! - [`components`] - Board, LED and push button models
//! - [`engine`] - Start/stop state machine, tick loop, timers and status
//! - [`codegen`] - Arduino sketch template
//! - [`workbench`] - Application context and front-end seam
//! - [`scenario`] - Scripted UI events
//! - [`console`] - Terminal front end (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! pinsim scenario.pin
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import init, { WasmWorkbench } from 'pinsim_core';
//!
//! await init();
//! const bench = new WasmWorkbench(showToast, renderStatus);
//! bench.place('board', 40, 40);
//! bench.start();
//! ```
//!
//! ## Simulation Model
//!
//! There is no electrical model. While running, every 50 ms tick copies the
//! button's pressed flag onto the LED. Stopping switches the LED off and
//! releases the button.

pub mod circuit;
pub mod codegen;
pub mod components;
pub mod engine;
pub mod error;
pub mod scenario;
pub mod workbench;

#[cfg(feature = "cli")]
pub mod console;

// Re-export main types for convenience
pub use circuit::{ComponentId, ComponentKind, Pin, Position, Registry};
pub use engine::{Engine, EngineState};
pub use error::{Result, SimError};
pub use workbench::Workbench;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmWorkbench;
