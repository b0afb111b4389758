//! LED output component.

use crate::circuit::{ComponentId, Pin, Position};

/// An LED wired to a digital output pin.
///
/// Modeled as a single boolean: lit or dark. There is no current limiting,
/// brightness or forward voltage.
#[derive(Debug, Clone)]
pub struct Led {
    pub id: ComponentId,
    pub position: Position,
    pub pin: Pin,
    /// Whether the LED is lit
    pub on: bool,
}

impl Led {
    /// Create a new LED, initially off.
    pub fn new(id: ComponentId, position: Position, pin: Pin) -> Self {
        Self {
            id,
            position,
            pin,
            on: false,
        }
    }

    /// Set the LED state.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Whether the LED is lit.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
