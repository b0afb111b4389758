//! Control components: the momentary push button.

use crate::circuit::{ComponentId, Pin, Position};

/// A momentary push button wired to a digital input pin.
///
/// The pressed flag is a physical input: the UI may assert it at any time,
/// whether or not the simulation is running.
#[derive(Debug, Clone)]
pub struct PushButton {
    pub id: ComponentId,
    pub position: Position,
    pub pin: Pin,
    pub pressed: bool,
}

impl PushButton {
    /// Create a new button, initially released.
    pub fn new(id: ComponentId, position: Position, pin: Pin) -> Self {
        Self {
            id,
            position,
            pin,
            pressed: false,
        }
    }

    /// Press or release the button.
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Whether the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
