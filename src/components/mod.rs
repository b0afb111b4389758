//! Component models for the workbench.
//!
//! This module provides the three component kinds a user can place:
//! - Board: the microcontroller placeholder
//! - Led: a digital output indicator
//! - PushButton: a momentary digital input
//!
//! LEDs and buttons carry a pin number; the board does not.

mod board;
mod controls;
mod led;

pub use board::Board;
pub use controls::PushButton;
pub use led::Led;

use crate::circuit::{ComponentId, ComponentKind, Pin, Position};

/// A placed component.
#[derive(Debug, Clone)]
pub enum Component {
    Board(Board),
    Led(Led),
    Button(PushButton),
}

impl Component {
    /// Get the component ID.
    pub fn id(&self) -> ComponentId {
        match self {
            Component::Board(b) => b.id,
            Component::Led(l) => l.id,
            Component::Button(s) => s.id,
        }
    }

    /// Get the component kind.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Board(_) => ComponentKind::Board,
            Component::Led(_) => ComponentKind::Led,
            Component::Button(_) => ComponentKind::Button,
        }
    }

    /// Get the canvas position.
    pub fn position(&self) -> Position {
        match self {
            Component::Board(b) => b.position,
            Component::Led(l) => l.position,
            Component::Button(s) => s.position,
        }
    }

    /// Move the component on the canvas.
    pub fn set_position(&mut self, position: Position) {
        match self {
            Component::Board(b) => b.position = position,
            Component::Led(l) => l.position = position,
            Component::Button(s) => s.position = position,
        }
    }

    /// Get the assigned pin, if this kind has one.
    pub fn pin(&self) -> Option<Pin> {
        match self {
            Component::Board(_) => None,
            Component::Led(l) => Some(l.pin),
            Component::Button(s) => Some(s.pin),
        }
    }

    /// Borrow as an LED.
    pub fn as_led(&self) -> Option<&Led> {
        match self {
            Component::Led(l) => Some(l),
            _ => None,
        }
    }

    /// Borrow as a push button.
    pub fn as_button(&self) -> Option<&PushButton> {
        match self {
            Component::Button(s) => Some(s),
            _ => None,
        }
    }
}
