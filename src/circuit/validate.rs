//! Circuit validation.

use crate::error::{Result, SimError};

use super::{ComponentKind, Registry};

/// Validate a circuit for simulation.
///
/// Checks, in order:
/// - A board is present
/// - An LED is present
/// - A button is present
/// - The first LED and first button are on different pins
pub fn validate_circuit(registry: &Registry) -> Result<()> {
    if registry.find(ComponentKind::Board).is_none() {
        return Err(SimError::MissingBoard);
    }

    let led = registry.led().ok_or(SimError::MissingLed)?;
    let button = registry.button().ok_or(SimError::MissingButton)?;

    if led.pin == button.pin {
        return Err(SimError::PinConflict {
            pin: led.pin.number(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Pin, Position};

    fn complete() -> Registry {
        let mut reg = Registry::new();
        reg.add(ComponentKind::Board, Position::default()).unwrap();
        reg.add(ComponentKind::Led, Position::default()).unwrap();
        reg.add(ComponentKind::Button, Position::default()).unwrap();
        reg
    }

    #[test]
    fn test_complete_circuit_is_valid() {
        assert!(validate_circuit(&complete()).is_ok());
    }

    #[test]
    fn test_missing_parts_reported_in_order() {
        let mut reg = Registry::new();
        assert!(matches!(validate_circuit(&reg), Err(SimError::MissingBoard)));

        reg.add(ComponentKind::Button, Position::default()).unwrap();
        reg.add(ComponentKind::Board, Position::default()).unwrap();
        assert!(matches!(validate_circuit(&reg), Err(SimError::MissingLed)));

        let mut reg = Registry::new();
        reg.add(ComponentKind::Board, Position::default()).unwrap();
        reg.add(ComponentKind::Led, Position::default()).unwrap();
        assert!(matches!(validate_circuit(&reg), Err(SimError::MissingButton)));
    }

    #[test]
    fn test_forced_pin_conflict() {
        let mut reg = complete();
        // set_pin refuses this, so force it underneath the registry.
        if let Some(led) = reg.leds_mut().next() {
            led.pin = Pin::new(2).unwrap();
        }
        assert!(matches!(
            validate_circuit(&reg),
            Err(SimError::PinConflict { pin: 2 })
        ));
    }
}
