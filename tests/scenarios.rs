//! End-to-end workbench scenarios.

use std::time::Duration;

use pinsim_core::engine::{EngineState, ManualTimer};
use pinsim_core::workbench::NullFrontend;
use pinsim_core::{scenario, ComponentId, ComponentKind, Pin, Position, SimError, Workbench};

const TICK: Duration = Duration::from_millis(50);

fn bench() -> Workbench<ManualTimer> {
    Workbench::manual(Box::new(NullFrontend))
}

fn place(wb: &mut Workbench<ManualTimer>, kind: ComponentKind) -> ComponentId {
    wb.place(kind, Position::default()).unwrap()
}

fn led_on(wb: &Workbench<ManualTimer>) -> bool {
    wb.registry().led().unwrap().on
}

#[test]
fn test_press_release_stop_cycle() {
    let mut wb = bench();
    place(&mut wb, ComponentKind::Board);
    place(&mut wb, ComponentKind::Led);
    let button = place(&mut wb, ComponentKind::Button);

    assert_eq!(wb.registry().led().unwrap().pin, Pin::new(10).unwrap());
    assert_eq!(wb.registry().button().unwrap().pin, Pin::new(2).unwrap());
    wb.start().unwrap();

    wb.set_pressed(button, true).unwrap();
    wb.advance(TICK);
    assert!(led_on(&wb));

    wb.set_pressed(button, false).unwrap();
    wb.advance(TICK);
    assert!(!led_on(&wb));

    // Held down at stop time
    wb.set_pressed(button, true).unwrap();
    wb.advance(TICK);
    assert!(led_on(&wb));
    assert!(wb.stop());
    assert!(!led_on(&wb));
    assert!(!wb.registry().button().unwrap().pressed);
    assert_eq!(wb.engine().state(), EngineState::Idle);
}

#[test]
fn test_press_while_idle_does_not_light_led() {
    let mut wb = bench();
    place(&mut wb, ComponentKind::Board);
    place(&mut wb, ComponentKind::Led);
    let button = place(&mut wb, ComponentKind::Button);

    wb.set_pressed(button, true).unwrap();
    assert!(wb.registry().button().unwrap().pressed);
    assert_eq!(wb.advance(Duration::from_secs(1)), 0);
    assert!(!led_on(&wb));

    // Starting with the button already held picks it up on the first tick.
    wb.start().unwrap();
    wb.advance(TICK);
    assert!(led_on(&wb));
}

#[test]
fn test_start_without_board_leaves_engine_idle() {
    let mut wb = bench();
    place(&mut wb, ComponentKind::Led);
    place(&mut wb, ComponentKind::Button);

    assert!(matches!(wb.start(), Err(SimError::MissingBoard)));
    assert_eq!(wb.engine().state(), EngineState::Idle);
    assert!(!wb.timer().is_active());
    assert_eq!(wb.timer().schedules_created(), 0);
}

#[test]
fn test_start_requires_led_and_button() {
    let mut wb = bench();
    place(&mut wb, ComponentKind::Board);
    assert!(matches!(wb.start(), Err(SimError::MissingLed)));
    place(&mut wb, ComponentKind::Led);
    assert!(matches!(wb.start(), Err(SimError::MissingButton)));
    place(&mut wb, ComponentKind::Button);
    assert!(wb.start().is_ok());
}

#[test]
fn test_pin_collision_rejected_then_start_succeeds() {
    let mut wb = bench();
    place(&mut wb, ComponentKind::Board);
    let led = place(&mut wb, ComponentKind::Led);
    let button = place(&mut wb, ComponentKind::Button);

    assert!(matches!(wb.change_pin(led, 2), Err(SimError::PinInUse { pin: 2, .. })));
    assert!(matches!(wb.change_pin(button, 10), Err(SimError::PinInUse { pin: 10, .. })));
    assert!(wb.start().is_ok());
}

#[test]
fn test_at_most_one_board_across_add_remove() {
    let mut wb = bench();
    let board = place(&mut wb, ComponentKind::Board);
    for _ in 0..3 {
        assert!(matches!(
            wb.place(ComponentKind::Board, Position::default()),
            Err(SimError::DuplicateBoard)
        ));
    }
    wb.remove(board);
    place(&mut wb, ComponentKind::Board);
    let boards = wb
        .registry()
        .iter()
        .filter(|c| c.kind() == ComponentKind::Board)
        .count();
    assert_eq!(boards, 1);
}

#[test]
fn test_pins_stay_unique() {
    let mut wb = bench();
    let mut ids = Vec::new();
    for i in 0..12 {
        let kind = if i % 2 == 0 { ComponentKind::Led } else { ComponentKind::Button };
        ids.push(place(&mut wb, kind));
    }
    for (i, &id) in ids.iter().enumerate() {
        let _ = wb.change_pin(id, 2 + (i as u8 * 5) % 12);
    }

    let mut pins: Vec<Pin> = wb.registry().iter().filter_map(|c| c.pin()).collect();
    let count = pins.len();
    pins.sort();
    pins.dedup();
    assert_eq!(pins.len(), count);
}

#[test]
fn test_scenario_file_example() {
    let script = scenario::parse(include_str!("../scenarios/blink.pin")).unwrap();
    let mut wb = bench();
    let mut out = Vec::new();
    let summary = scenario::run(&script, &mut wb, &mut out).unwrap();

    assert_eq!(summary.rejected, 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("✓ LED on Pin 10 - ON"));
    assert!(out.contains("const int BUTTON_PIN = 2;"));
    assert!(!led_on(&wb));
}
