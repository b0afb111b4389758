//! Core types for the component registry.

use std::fmt;

use crate::error::{Result, SimError};

/// A unique identifier for a placed component.
///
/// Ids are assigned monotonically and never reused, even after a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Digital pins an LED or button may be wired to.
pub const AVAILABLE_PINS: [u8; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];

/// A digital I/O pin number in the range 2..=13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    /// Lowest assignable pin.
    pub const MIN: Pin = Pin(2);
    /// Highest assignable pin.
    pub const MAX: Pin = Pin(13);
    /// Pin an LED gets when first placed.
    pub const DEFAULT_LED: Pin = Pin(10);
    /// Pin a button gets when first placed.
    pub const DEFAULT_BUTTON: Pin = Pin(2);

    /// Create a pin, rejecting numbers outside 2..=13.
    pub fn new(number: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Ok(Pin(number))
        } else {
            Err(SimError::InvalidPin { pin: number })
        }
    }

    /// The raw pin number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Iterate over every assignable pin in ascending order.
    pub fn all() -> impl Iterator<Item = Pin> {
        AVAILABLE_PINS.into_iter().map(Pin)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canvas position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The kinds of component the workbench offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// The microcontroller board (at most one)
    Board,
    /// An LED driven by a digital output
    Led,
    /// A momentary push button read by a digital input
    Button,
}

impl ComponentKind {
    /// Parse a kind from its palette name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "board" | "arduino" | "uno" => Some(Self::Board),
            "led" => Some(Self::Led),
            "button" | "btn" | "pushbutton" => Some(Self::Button),
            _ => None,
        }
    }

    /// Human-readable name used in status lines and toasts.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Board => "Arduino Uno",
            Self::Led => "LED",
            Self::Button => "Push Button",
        }
    }

    /// Name of the kind in the page's component palette.
    pub fn palette_name(self) -> &'static str {
        match self {
            Self::Board => "arduino",
            Self::Led => "led",
            Self::Button => "button",
        }
    }

    /// Pin a freshly placed component of this kind asks for.
    pub fn default_pin(self) -> Option<Pin> {
        match self {
            Self::Board => None,
            Self::Led => Some(Pin::DEFAULT_LED),
            Self::Button => Some(Pin::DEFAULT_BUTTON),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Board => "board",
            Self::Led => "led",
            Self::Button => "button",
        };
        f.write_str(tag)
    }
}
