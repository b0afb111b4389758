//! The microcontroller board.

use crate::circuit::{ComponentId, Position};

/// The microcontroller board placeholder.
///
/// Carries no electrical state. The simulation only requires that one is
/// present before it will start.
#[derive(Debug, Clone)]
pub struct Board {
    pub id: ComponentId,
    pub position: Position,
}

impl Board {
    /// Create a new board.
    pub fn new(id: ComponentId, position: Position) -> Self {
        Self { id, position }
    }
}
