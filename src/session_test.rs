#![allow(clippy::float_cmp)]

use std::time::Duration;

use serde_json::json;
use viewport::ViewportState;
use viewport::scene::BackgroundTexture;

use super::*;
use crate::surface::HeadlessSurfaces;

// =============================================================
// Helpers
// =============================================================

/// Loader that never touches the filesystem.
struct FakeLoader {
    fail: bool,
}

#[async_trait::async_trait]
impl AssetLoader for FakeLoader {
    async fn load_background(&self, path: &str) -> Result<BackgroundTexture, BridgeError> {
        if self.fail {
            let source = image::ImageError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
            return Err(BridgeError::AssetLoad { path: path.to_owned(), source });
        }
        Ok(BackgroundTexture { source: path.to_owned(), width: 800, height: 800 })
    }
}

fn start_with(config: BridgeConfig, surfaces: &HeadlessSurfaces, fail_load: bool) -> SessionHandle {
    spawn_session(config, Arc::new(surfaces.clone()), Arc::new(FakeLoader { fail: fail_load })).expect("spawn")
}

fn start(surfaces: &HeadlessSurfaces) -> SessionHandle {
    start_with(BridgeConfig::default(), surfaces, false)
}

fn init_with(brush_size: f64) -> Command {
    serde_json::from_value(json!({
        "type": "init",
        "canvasHandle": "canvas-1",
        "imagePath": "/slides/a.png",
        "data": [[100, 100, 7, 9], [300, 300, 1, 1]],
        "brushSize": brush_size,
        "scaleFactor": 1,
        "viewport": {
            "screenWidth": 800, "screenHeight": 800, "worldWidth": 800, "worldHeight": 800,
            "pluginOptions": {"tooltip": {"enabled": true}},
        },
    }))
    .expect("init")
}

fn init() -> Command {
    init_with(4.0)
}

async fn next(handle: &mut SessionHandle) -> Event {
    time::timeout(Duration::from_secs(5), handle.recv()).await.expect("timed out").expect("session ended")
}

async fn next_error(handle: &mut SessionHandle) -> ErrorCode {
    match next(handle).await {
        Event::Error { code, .. } => code,
        other => panic!("expected error, got {other:?}"),
    }
}

async fn next_init_complete(handle: &mut SessionHandle) -> ViewportState {
    match next(handle).await {
        Event::InitComplete { state } => state,
        other => panic!("expected initComplete, got {other:?}"),
    }
}

// =============================================================
// Lifecycle
// =============================================================

#[tokio::test(start_paused = true)]
async fn init_then_first_frame_then_visible_points() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(init()).await.expect("send");

    let state = next_init_complete(&mut handle).await;
    assert_eq!(state.scale.x, 1.0);
    assert!(matches!(next(&mut handle).await, Event::ViewportUpdate { .. }));
    assert_eq!(next(&mut handle).await, Event::InitialRenderComplete {});

    let Event::VisiblePointsUpdate { data } = next(&mut handle).await else {
        panic!("expected visible points");
    };
    assert_eq!(data.len(), 2);
    assert!(surfaces.is_claimed("canvas-1"));

    handle.join().await.expect("join");
}

#[tokio::test(start_paused = true)]
async fn commands_before_init_are_replayed_in_order() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(Command::Zoom { scale: 2.0, center: None }).await.expect("send");
    handle.send(Command::Zoom { scale: 1.5, center: None }).await.expect("send");
    handle.send(init()).await.expect("send");

    // initComplete reports the state before the replay.
    assert_eq!(next_init_complete(&mut handle).await.scale.x, 1.0);
    let Event::ViewportUpdate { state } = next(&mut handle).await else {
        panic!("expected viewportUpdate");
    };
    assert_eq!(state.scale.x, 3.0);
}

#[tokio::test(start_paused = true)]
async fn pending_overflow_drops_oldest() {
    let surfaces = HeadlessSurfaces::new();
    let config = BridgeConfig { pending_capacity: 2, ..BridgeConfig::default() };
    let mut handle = start_with(config, &surfaces, false);
    for scale in [2.0, 3.0, 1.5] {
        handle.send(Command::Zoom { scale, center: None }).await.expect("send");
    }
    handle.send(init()).await.expect("send");

    next_init_complete(&mut handle).await;
    let Event::ViewportUpdate { state } = next(&mut handle).await else {
        panic!("expected viewportUpdate");
    };
    assert_eq!(state.scale.x, 4.5);
}

#[tokio::test(start_paused = true)]
async fn tooltip_flows_after_init() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(init()).await.expect("send");
    next_init_complete(&mut handle).await;

    let hover = Command::PointerMove { client_x: 101.0, client_y: 101.0, canvas_x: 101.0, canvas_y: 101.0 };
    handle.send(hover).await.expect("send");
    loop {
        match next(&mut handle).await {
            Event::TooltipUpdate { data } => {
                assert_eq!(data.map(|t| (t.original_x, t.original_y)), Some((100.0, 100.0)));
                break;
            }
            Event::ViewportUpdate { .. } | Event::InitialRenderComplete {} | Event::VisiblePointsUpdate { .. } => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn closing_commands_releases_surface() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(init()).await.expect("send");
    next_init_complete(&mut handle).await;
    assert!(surfaces.is_claimed("canvas-1"));

    handle.close();
    while handle.recv().await.is_some() {}
    assert!(!surfaces.is_claimed("canvas-1"));
    assert!(matches!(handle.send(Command::Reset {}).await, Err(BridgeError::ChannelClosed)));
}

#[tokio::test(start_paused = true)]
async fn reinit_replaces_engine_on_same_handle() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(init()).await.expect("send");
    next_init_complete(&mut handle).await;

    handle.send(init()).await.expect("send");
    loop {
        match next(&mut handle).await {
            Event::InitComplete { .. } => break,
            Event::Error { code, message } => panic!("re-init failed: {code:?} {message}"),
            _ => {}
        }
    }
    assert!(surfaces.is_claimed("canvas-1"));
}

// =============================================================
// Init failures
// =============================================================

#[tokio::test(start_paused = true)]
async fn init_without_viewport_is_invalid_init() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    let bare = serde_json::from_value(json!({"type": "init", "canvasHandle": "canvas-1", "brushSize": 4, "scaleFactor": 1}))
        .expect("bare init");
    handle.send(bare).await.expect("send");
    assert_eq!(next_error(&mut handle).await, ErrorCode::InvalidInit);
    assert!(!surfaces.is_claimed("canvas-1"));

    // The session still accepts a good init afterwards.
    handle.send(init()).await.expect("send");
    next_init_complete(&mut handle).await;
}

#[tokio::test(start_paused = true)]
async fn claimed_surface_is_unavailable() {
    let surfaces = HeadlessSurfaces::new();
    let _held = surfaces.claim("canvas-1").expect("claim");
    let mut handle = start(&surfaces);
    handle.send(init()).await.expect("send");
    assert_eq!(next_error(&mut handle).await, ErrorCode::SurfaceUnavailable);
}

#[tokio::test(start_paused = true)]
async fn background_failure_still_builds_engine() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start_with(BridgeConfig::default(), &surfaces, true);
    handle.send(init()).await.expect("send");
    assert_eq!(next_error(&mut handle).await, ErrorCode::BackgroundLoadFailed);
    next_init_complete(&mut handle).await;
}

#[tokio::test(start_paused = true)]
async fn bad_brush_is_invalid_content_and_releases_surface() {
    let surfaces = HeadlessSurfaces::new();
    let mut handle = start(&surfaces);
    handle.send(init_with(0.0)).await.expect("send");
    assert_eq!(next_error(&mut handle).await, ErrorCode::InvalidContent);
    assert!(!surfaces.is_claimed("canvas-1"));
}

#[tokio::test]
async fn invalid_config_rejected_before_spawn() {
    let surfaces = HeadlessSurfaces::new();
    let config = BridgeConfig { channel_capacity: 0, ..BridgeConfig::default() };
    let result = spawn_session(config, Arc::new(surfaces), Arc::new(FakeLoader { fail: false }));
    assert!(matches!(result.err(), Some(BridgeError::InvalidConfig(_))));
}
