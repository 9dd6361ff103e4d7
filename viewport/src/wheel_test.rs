use super::*;
use crate::input::Key;

fn sample(delta_y: f64, delta_mode: u32) -> WheelSample {
    WheelSample { delta_y, delta_mode, position: Point::new(120.0, 80.0) }
}

#[test]
fn scroll_up_zooms_in_at_cursor() {
    let wheel = WheelPlugin::new(WheelOptions::default());
    let step = wheel.on_wheel(&sample(-100.0, 0), &PressedKeys::default()).unwrap();
    // 2^((1 + 0.1) * 100 / 1000)
    let expected = 2f64.powf(0.11);
    assert!((step.multiplier - expected).abs() < 1e-12);
    assert_eq!(step.anchor, Point::new(120.0, 80.0));
}

#[test]
fn scroll_down_zooms_out() {
    let wheel = WheelPlugin::new(WheelOptions::default());
    let step = wheel.on_wheel(&sample(100.0, 0), &PressedKeys::default()).unwrap();
    assert!(step.multiplier < 1.0);
}

#[test]
fn reverse_flips_direction() {
    let wheel = WheelPlugin::new(WheelOptions { reverse: true, ..WheelOptions::default() });
    let step = wheel.on_wheel(&sample(-100.0, 0), &PressedKeys::default()).unwrap();
    assert!(step.multiplier < 1.0);
}

#[test]
fn line_mode_uses_line_height() {
    let wheel = WheelPlugin::new(WheelOptions::default());
    assert!((wheel.pixel_delta(&sample(-3.0, 1)) + 60.0).abs() < f64::EPSILON);
    let lines = wheel.on_wheel(&sample(-3.0, 1), &PressedKeys::default()).unwrap();
    let pixels = wheel.on_wheel(&sample(-60.0, 0), &PressedKeys::default()).unwrap();
    assert!((lines.multiplier - pixels.multiplier).abs() < 1e-12);
}

#[test]
fn configured_center_overrides_cursor() {
    let center = Point::new(400.0, 300.0);
    let wheel = WheelPlugin::new(WheelOptions { center: Some(center), ..WheelOptions::default() });
    let step = wheel.on_wheel(&sample(-10.0, 0), &PressedKeys::default()).unwrap();
    assert_eq!(step.anchor, center);
}

#[test]
fn zero_delta_is_ignored() {
    let wheel = WheelPlugin::new(WheelOptions::default());
    assert_eq!(wheel.on_wheel(&sample(0.0, 0), &PressedKeys::default()), None);
}

#[test]
fn key_gate() {
    let wheel = WheelPlugin::new(WheelOptions { key_to_press: Some("Control".into()), ..WheelOptions::default() });
    let mut keys = PressedKeys::default();
    assert_eq!(wheel.on_wheel(&sample(-10.0, 0), &keys), None);
    keys.press(Key("Control".into()));
    assert!(wheel.on_wheel(&sample(-10.0, 0), &keys).is_some());
}
