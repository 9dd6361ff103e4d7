use std::sync::Arc;
use std::time::Duration;

use messages::decode_event;
use serde_json::json;
use viewport::scene::BackgroundTexture;

use super::*;
use crate::assets::AssetLoader;
use crate::config::BridgeConfig;
use crate::session::spawn_session;
use crate::surface::HeadlessSurfaces;

struct StubLoader;

#[async_trait::async_trait]
impl AssetLoader for StubLoader {
    async fn load_background(&self, path: &str) -> Result<BackgroundTexture, BridgeError> {
        Ok(BackgroundTexture { source: path.to_owned(), width: 10, height: 10 })
    }
}

fn session_with(config: BridgeConfig, surfaces: &HeadlessSurfaces) -> SessionHandle {
    spawn_session(config, Arc::new(surfaces.clone()), Arc::new(StubLoader)).expect("spawn")
}

fn session(surfaces: &HeadlessSurfaces) -> SessionHandle {
    session_with(BridgeConfig::default(), surfaces)
}

fn events(output: &[u8]) -> Vec<Event> {
    std::str::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|line| decode_event(line).expect("event line"))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn relays_commands_and_reports_bad_lines() {
    let init = json!({
        "type": "init", "canvasHandle": "c", "imagePath": "bg.png",
        "data": [], "brushSize": 4, "scaleFactor": 1, "viewport": {},
    });
    let input = format!("\n{{not json\n{init}\n   \n");
    let surfaces = HeadlessSurfaces::new();
    let mut output = Vec::new();

    run(input.as_bytes(), &mut output, session(&surfaces)).await.expect("run");

    let events = events(&output);
    assert!(events.iter().any(|e| matches!(e, Event::Error { code: ErrorCode::InvalidCommand, .. })));
    assert!(events.iter().any(|e| matches!(e, Event::InitComplete { .. })));
    // Input ended, so the session tore the engine down.
    assert!(!surfaces.is_claimed("c"));
}

#[tokio::test(start_paused = true)]
async fn empty_input_ends_cleanly() {
    let surfaces = HeadlessSurfaces::new();
    let mut output = Vec::new();
    run(&b""[..], &mut output, session(&surfaces)).await.expect("run");
    assert!(output.is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_command_type_is_reported() {
    let surfaces = HeadlessSurfaces::new();
    let mut output = Vec::new();
    run(&b"{\"type\":\"explode\"}\n"[..], &mut output, session(&surfaces)).await.expect("run");
    let events = events(&output);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::Error { code: ErrorCode::InvalidCommand, .. }));
}

#[tokio::test(start_paused = true)]
async fn event_per_command_flood_drains_through_small_channels() {
    const LINES: usize = 2_000;
    let init = json!({
        "type": "init", "canvasHandle": "c", "imagePath": "bg.png",
        "data": [], "brushSize": 4, "scaleFactor": 1,
        "viewport": {"pluginOptions": {"tooltip": {"enabled": true}}},
    });
    let mut input = format!("{init}\n");
    for _ in 0..LINES {
        input.push_str("{\"type\":\"pointerLeave\"}\n");
    }
    let surfaces = HeadlessSurfaces::new();
    let config = BridgeConfig { channel_capacity: 2, ..BridgeConfig::default() };
    let mut output = Vec::new();

    tokio::time::timeout(Duration::from_secs(60), run(input.as_bytes(), &mut output, session_with(config, &surfaces)))
        .await
        .expect("relay stalled")
        .expect("run");

    let cleared = events(&output).iter().filter(|e| matches!(e, Event::TooltipUpdate { data: None })).count();
    assert_eq!(cleared, LINES);
}
