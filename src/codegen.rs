//! Arduino sketch generation.
//!
//! The sketch is a fixed template; the only inputs are the LED pin and the
//! button pin. The button is read with `INPUT_PULLUP`, so LOW means pressed.

use crate::circuit::{ComponentKind, Pin, Registry};

/// Placeholder emitted while the circuit is incomplete.
pub const INCOMPLETE_PLACEHOLDER: &str = "// Add Arduino, LED, and Button to generate code";

/// Generate the sketch for the first LED and button on the canvas.
///
/// Returns [`INCOMPLETE_PLACEHOLDER`] unless a board, an LED and a button are
/// all present.
pub fn generate_sketch(registry: &Registry) -> String {
    let board = registry.find(ComponentKind::Board);
    match (board, registry.led(), registry.button()) {
        (Some(_), Some(led), Some(button)) => render_sketch(led.pin, button.pin),
        _ => INCOMPLETE_PLACEHOLDER.to_string(),
    }
}

/// Render the sketch template with the given pins.
pub fn render_sketch(led_pin: Pin, button_pin: Pin) -> String {
    format!(
        r#"const int LED_PIN = {led_pin};
const int BUTTON_PIN = {button_pin};

void setup() {{
  pinMode(LED_PIN, OUTPUT);
  pinMode(BUTTON_PIN, INPUT_PULLUP);

  digitalWrite(LED_PIN, LOW); // LED Off by default
}}

void loop() {{
  // Read button (INPUT_PULLUP means Low = Pressed)
  int state = digitalRead(BUTTON_PIN);

  if (state == LOW) {{
    digitalWrite(LED_PIN, HIGH); // Turn LED On
  }} else {{
    digitalWrite(LED_PIN, LOW);  // Turn LED Off
  }}
}}"#
    )
}
