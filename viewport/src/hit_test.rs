use super::*;
use crate::camera::{Point, Size};
use crate::config::{ClampOptions, ClampZoomOptions};

#[test]
fn radius_equals_brush() {
    // brush 4 → sprite scale 4 * 2 / 8 = 1 → radius 4
    assert!((hit_radius(1.0) - 4.0).abs() < f64::EPSILON);
    assert!((hit_radius(2.5) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn tooltip_projects_to_screen() {
    let mut camera =
        Camera::new(Size::new(800.0, 800.0), Size::new(800.0, 800.0), ClampOptions::default(), ClampZoomOptions::default())
            .unwrap();
    camera.zoom_at(2.0, Point::new(0.0, 0.0));
    let marker = MarkerRecord::new(100.0, 50.0, 7.0, 9.0, 4.0);
    let tooltip = TooltipRecord::from_marker(&marker, &camera);
    assert_eq!(
        tooltip,
        TooltipRecord { x: 200.0, y: 100.0, width: 7.0, height: 9.0, original_x: 100.0, original_y: 50.0 }
    );
}

#[test]
fn tooltip_serializes_camel_case() {
    let tooltip = TooltipRecord { x: 1.0, y: 2.0, width: 3.0, height: 4.0, original_x: 5.0, original_y: 6.0 };
    let json = serde_json::to_value(tooltip).unwrap();
    assert_eq!(json["originalX"], 5.0);
    assert_eq!(json["originalY"], 6.0);
}

// =============================================================
// Hover
// =============================================================

#[test]
fn first_hit_hovers_only() {
    let mut hover = HoverTracker::default();
    let change = hover.update(Some("a"));
    assert_eq!(change, HoverChange { unhover: None, hover: Some("a".into()) });
    assert_eq!(hover.current(), Some("a"));
}

#[test]
fn same_hit_changes_nothing() {
    let mut hover = HoverTracker::default();
    hover.update(Some("a"));
    assert!(hover.update(Some("a")).is_empty());
}

#[test]
fn switching_touches_old_and_new() {
    let mut hover = HoverTracker::default();
    hover.update(Some("a"));
    let change = hover.update(Some("b"));
    assert_eq!(change, HoverChange { unhover: Some("a".into()), hover: Some("b".into()) });
}

#[test]
fn miss_unhovers_previous() {
    let mut hover = HoverTracker::default();
    hover.update(Some("a"));
    assert_eq!(hover.clear(), HoverChange { unhover: Some("a".into()), hover: None });
    assert!(hover.clear().is_empty());
    assert_eq!(hover.current(), None);
}
