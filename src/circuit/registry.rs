//! Component registry.

use tracing::{debug, warn};

use super::types::{ComponentId, ComponentKind, Pin, Position};
use crate::components::{Board, Component, Led, PushButton};
use crate::error::{Result, SimError};

/// Ordered collection of the components placed on the canvas.
///
/// Maintains two invariants across every operation:
/// - at most one board exists
/// - no two LEDs/buttons share a pin
#[derive(Debug, Default)]
pub struct Registry {
    /// Components in placement order
    components: Vec<Component>,
    /// Next id to hand out
    next_id: usize,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new component and return it.
    ///
    /// LEDs and buttons get their default pin (LED 10, button 2). If that pin
    /// is already held, the lowest free pin is used instead.
    pub fn add(&mut self, kind: ComponentKind, position: Position) -> Result<&Component> {
        if kind == ComponentKind::Board && self.find(ComponentKind::Board).is_some() {
            warn!("rejected second board");
            return Err(SimError::DuplicateBoard);
        }

        let id = ComponentId(self.next_id);
        let component = match kind {
            ComponentKind::Board => Component::Board(Board::new(id, position)),
            ComponentKind::Led => Component::Led(Led::new(id, position, self.claim_pin(kind)?)),
            ComponentKind::Button => {
                Component::Button(PushButton::new(id, position, self.claim_pin(kind)?))
            }
        };
        self.next_id += 1;

        debug!(%id, %kind, pin = ?component.pin().map(Pin::number), x = position.x, y = position.y, "component placed");
        self.components.push(component);
        Ok(&self.components[self.components.len() - 1])
    }

    /// Remove a component. Returns `None` if the id is unknown.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        let idx = self.index_of(id)?;
        let removed = self.components.remove(idx);
        debug!(%id, kind = %removed.kind(), "component removed");
        Some(removed)
    }

    /// Reassign the pin of an LED or button.
    ///
    /// Rejected if another LED/button already holds `pin`; the prior pin is
    /// kept in that case.
    pub fn set_pin(&mut self, id: ComponentId, pin: Pin) -> Result<()> {
        let idx = self.index_of(id).ok_or(SimError::ComponentNotFound { id })?;

        if let Some(holder) = self.pin_holder(pin, Some(id)) {
            warn!(%id, pin = pin.number(), %holder, "pin change rejected");
            return Err(SimError::PinInUse {
                pin: pin.number(),
                holder,
            });
        }

        match &mut self.components[idx] {
            Component::Led(l) => l.pin = pin,
            Component::Button(s) => s.pin = pin,
            Component::Board(_) => {
                return Err(SimError::NoPinOnComponent {
                    kind: ComponentKind::Board.display_name().to_string(),
                })
            }
        }

        debug!(%id, pin = pin.number(), "pin changed");
        Ok(())
    }

    /// Press or release a button.
    pub fn set_pressed(&mut self, id: ComponentId, pressed: bool) -> Result<()> {
        let idx = self.index_of(id).ok_or(SimError::ComponentNotFound { id })?;
        match &mut self.components[idx] {
            Component::Button(s) => {
                s.set_pressed(pressed);
                debug!(%id, pressed, "button input");
                Ok(())
            }
            _ => Err(SimError::NotAButton { id }),
        }
    }

    /// Move a component on the canvas.
    pub fn move_to(&mut self, id: ComponentId, position: Position) -> Result<()> {
        let idx = self.index_of(id).ok_or(SimError::ComponentNotFound { id })?;
        self.components[idx].set_position(position);
        Ok(())
    }

    /// Remove every component. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        debug!(count = self.components.len(), "registry cleared");
        self.components.clear();
    }

    /// First component of the given kind, in placement order.
    pub fn find(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// Look up a component by id.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// First LED, if any.
    pub fn led(&self) -> Option<&Led> {
        self.components.iter().find_map(Component::as_led)
    }

    /// First button, if any.
    pub fn button(&self) -> Option<&PushButton> {
        self.components.iter().find_map(Component::as_button)
    }

    /// Iterate over LEDs in placement order.
    pub fn leds(&self) -> impl Iterator<Item = &Led> {
        self.components.iter().filter_map(Component::as_led)
    }

    /// Iterate over buttons in placement order.
    pub fn buttons(&self) -> impl Iterator<Item = &PushButton> {
        self.components.iter().filter_map(Component::as_button)
    }

    /// Pins the given component could switch to: every digital pin not held
    /// by another LED or button.
    pub fn available_pins(&self, id: ComponentId) -> Vec<Pin> {
        Pin::all()
            .filter(|&pin| self.pin_holder(pin, Some(id)).is_none())
            .collect()
    }

    /// Iterate over components in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Number of placed components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub(crate) fn leds_mut(&mut self) -> impl Iterator<Item = &mut Led> {
        self.components.iter_mut().filter_map(|c| match c {
            Component::Led(l) => Some(l),
            _ => None,
        })
    }

    pub(crate) fn buttons_mut(&mut self) -> impl Iterator<Item = &mut PushButton> {
        self.components.iter_mut().filter_map(|c| match c {
            Component::Button(s) => Some(s),
            _ => None,
        })
    }

    fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    /// The LED/button holding `pin`, ignoring `except`.
    fn pin_holder(&self, pin: Pin, except: Option<ComponentId>) -> Option<ComponentId> {
        self.components
            .iter()
            .filter(|c| Some(c.id()) != except)
            .find(|c| c.pin() == Some(pin))
            .map(Component::id)
    }

    /// The default pin of `kind` if free, otherwise the lowest free pin.
    fn claim_pin(&self, kind: ComponentKind) -> Result<Pin> {
        let free = |pin: &Pin| self.pin_holder(*pin, None).is_none();
        kind.default_pin()
            .filter(free)
            .or_else(|| Pin::all().find(free))
            .ok_or_else(|| SimError::NoFreePin {
                kind: kind.display_name().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(n: u8) -> Pin {
        Pin::new(n).unwrap()
    }

    #[test]
    fn test_add_assigns_ids_and_defaults() {
        let mut reg = Registry::new();
        let board = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        let led = reg.add(ComponentKind::Led, Position::new(10.0, 20.0)).unwrap().id();
        let button = reg.add(ComponentKind::Button, Position::default()).unwrap().id();

        assert_eq!(board, ComponentId(0));
        assert_eq!(led, ComponentId(1));
        assert_eq!(button, ComponentId(2));

        let l = reg.led().unwrap();
        assert_eq!(l.pin, pin(10));
        assert!(!l.on);
        assert_eq!(l.position, Position::new(10.0, 20.0));

        let b = reg.button().unwrap();
        assert_eq!(b.pin, pin(2));
        assert!(!b.pressed);
    }

    #[test]
    fn test_second_board_rejected() {
        let mut reg = Registry::new();
        reg.add(ComponentKind::Board, Position::default()).unwrap();
        let err = reg.add(ComponentKind::Board, Position::default()).unwrap_err();
        assert!(matches!(err, SimError::DuplicateBoard));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_board_can_be_replaced_after_removal() {
        let mut reg = Registry::new();
        let id = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        assert!(reg.remove(id).is_some());
        let again = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        assert_eq!(again, ComponentId(1));
    }

    #[test]
    fn test_default_pin_collision_falls_back_to_lowest_free() {
        let mut reg = Registry::new();
        let first = reg.add(ComponentKind::Button, Position::default()).unwrap().id();
        let second = reg.add(ComponentKind::Button, Position::default()).unwrap().id();
        assert_eq!(reg.get(first).unwrap().pin(), Some(pin(2)));
        assert_eq!(reg.get(second).unwrap().pin(), Some(pin(3)));
    }

    #[test]
    fn test_no_free_pin() {
        let mut reg = Registry::new();
        for _ in 0..12 {
            reg.add(ComponentKind::Led, Position::default()).unwrap();
        }
        let err = reg.add(ComponentKind::Button, Position::default()).unwrap_err();
        assert!(matches!(err, SimError::NoFreePin { .. }));

        // A failed add does not use up an id
        let board = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        assert_eq!(board, ComponentId(12));
    }

    #[test]
    fn test_set_pin_collision_keeps_prior_pin() {
        let mut reg = Registry::new();
        let led = reg.add(ComponentKind::Led, Position::default()).unwrap().id();
        let button = reg.add(ComponentKind::Button, Position::default()).unwrap().id();

        let err = reg.set_pin(led, pin(2)).unwrap_err();
        assert!(matches!(err, SimError::PinInUse { pin: 2, holder } if holder == button));
        assert_eq!(reg.get(led).unwrap().pin(), Some(pin(10)));

        reg.set_pin(led, pin(7)).unwrap();
        assert_eq!(reg.get(led).unwrap().pin(), Some(pin(7)));

        // Re-selecting the current pin is not a collision.
        reg.set_pin(led, pin(7)).unwrap();
    }

    #[test]
    fn test_set_pin_on_board_or_unknown() {
        let mut reg = Registry::new();
        let board = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        assert!(matches!(
            reg.set_pin(board, pin(5)),
            Err(SimError::NoPinOnComponent { .. })
        ));
        assert!(matches!(
            reg.set_pin(ComponentId(99), pin(5)),
            Err(SimError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn test_set_pressed_only_on_buttons() {
        let mut reg = Registry::new();
        let led = reg.add(ComponentKind::Led, Position::default()).unwrap().id();
        let button = reg.add(ComponentKind::Button, Position::default()).unwrap().id();

        reg.set_pressed(button, true).unwrap();
        assert!(reg.button().unwrap().pressed);
        assert!(matches!(reg.set_pressed(led, true), Err(SimError::NotAButton { .. })));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut reg = Registry::new();
        reg.add(ComponentKind::Led, Position::default()).unwrap();
        assert!(reg.remove(ComponentId(42)).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let mut reg = Registry::new();
        reg.add(ComponentKind::Board, Position::default()).unwrap();
        reg.add(ComponentKind::Led, Position::default()).unwrap();
        reg.clear();
        assert!(reg.is_empty());
        let id = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        assert_eq!(id, ComponentId(2));
    }

    #[test]
    fn test_available_pins_excludes_others() {
        let mut reg = Registry::new();
        let led = reg.add(ComponentKind::Led, Position::default()).unwrap().id();
        reg.add(ComponentKind::Button, Position::default()).unwrap();

        let pins = reg.available_pins(led);
        assert!(!pins.contains(&pin(2)));
        assert!(pins.contains(&pin(10)));
        assert_eq!(pins.len(), 11);
    }

    #[test]
    fn test_move_to() {
        let mut reg = Registry::new();
        let id = reg.add(ComponentKind::Board, Position::default()).unwrap().id();
        reg.move_to(id, Position::new(120.0, 45.5)).unwrap();
        assert_eq!(reg.get(id).unwrap().position(), Position::new(120.0, 45.5));
    }

    #[test]
    fn test_find_returns_first_in_placement_order() {
        let mut reg = Registry::new();
        let first = reg.add(ComponentKind::Led, Position::default()).unwrap().id();
        reg.add(ComponentKind::Led, Position::default()).unwrap();
        assert_eq!(reg.find(ComponentKind::Led).unwrap().id(), first);
        assert!(reg.find(ComponentKind::Board).is_none());
    }
}
