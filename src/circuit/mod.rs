//! Component registry and circuit validation.
//!
//! This module holds the canvas model: the [`Registry`] of placed
//! components and the [`validate_circuit`] gate that must pass before the
//! simulation engine may start.

mod registry;
mod types;
mod validate;

pub use registry::Registry;
pub use types::*;
pub use validate::validate_circuit;
