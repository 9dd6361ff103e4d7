//! Viewport engine for large marker sets over a background image.
//!
//! This crate owns everything that happens inside the rendering thread except
//! the event loop itself: the pan/zoom camera and its clamp policy, the input
//! plugins that turn pointer and wheel samples into camera instructions, the
//! spatial index behind hover and visibility queries, and the content builder
//! that turns raw data points into indexed markers and sprites. The host
//! (`cellview`) is responsible for the message loop, throttling, and the
//! transport; this crate never blocks and never spawns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`] (pure state) and [`engine::Engine`] (core + surface) |
//! | [`camera`] | Translation/scale state, world↔screen transforms, zoom-at-point, clamp |
//! | [`config`] | Typed plugin options, defaults, and key-by-key override merging |
//! | [`input`] | Shared input types: buttons, zoom steps, the exponential zoom curve |
//! | [`drag`] | Drag plugin state machine |
//! | [`wheel`] | Wheel plugin |
//! | [`pinch`] | Pinch plugin state machine |
//! | [`index`] | R-tree backed marker index: visibility and nearest-marker queries |
//! | [`hit`] | Hit-testing, hover tracking, tooltip records |
//! | [`content`] | Builds marker records, sprites, and the background from raw data |
//! | [`scene`] | Rendering-surface collaborator trait and a headless retained scene |
//! | [`consts`] | Shared numeric constants (glyph sizes, default dimensions) |
//! | [`error`] | Error type for fallible construction |

pub mod camera;
pub mod config;
pub mod consts;
pub mod content;
pub mod drag;
pub mod engine;
pub mod error;
pub mod hit;
pub mod index;
pub mod input;
pub mod pinch;
pub mod scene;
pub mod wheel;

pub use camera::{Bounds, Camera, Point, ViewportState};
pub use engine::{Engine, EngineCore, EngineInit, FrameOutcome};
pub use error::ViewportError;
