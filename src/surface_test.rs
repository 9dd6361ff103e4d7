use super::*;

#[test]
fn claim_marks_handle_until_drop() {
    let surfaces = HeadlessSurfaces::new();
    let surface = surfaces.claim("canvas-1").expect("claim");
    assert!(surfaces.is_claimed("canvas-1"));
    drop(surface);
    assert!(!surfaces.is_claimed("canvas-1"));
}

#[test]
fn second_claim_rejected_while_held() {
    let surfaces = HeadlessSurfaces::new();
    let _held = surfaces.claim("canvas-1").expect("claim");
    let err = surfaces.claim("canvas-1").err().expect("second claim");
    assert!(matches!(err, BridgeError::SurfaceAlreadyClaimed(ref h) if h == "canvas-1"));
    assert!(surfaces.claim("canvas-2").is_ok());
}

#[test]
fn empty_handle_unavailable() {
    let surfaces = HeadlessSurfaces::new();
    assert!(matches!(surfaces.claim("  ").err(), Some(BridgeError::SurfaceUnavailable(_))));
}

#[test]
fn claimed_surface_presents() {
    let surfaces = HeadlessSurfaces::new();
    let mut surface = surfaces.claim("canvas-1").expect("claim");
    assert!(surface.present());
}
