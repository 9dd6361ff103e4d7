//! Wire schema and JSON-lines codec for the viewport channels.
//!
//! Two one-way channels connect the UI side and the engine side:
//! - commands (UI → engine): [`Command`], decoded with [`decode_command`];
//! - events (engine → UI): [`Event`], encoded with [`encode_event`].
//!
//! Each message is one JSON object tagged by `type`, with camelCase fields,
//! written on its own line. The mirror pair ([`encode_command`],
//! [`decode_event`]) is what a UI-side client uses.

use serde::{Deserialize, Serialize};
use viewport::config::ViewportOptions;
use viewport::hit::TooltipRecord;
use viewport::index::VisiblePoint;
use viewport::{Point, ViewportState};

/// Error returned by the codec functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The line is not valid JSON, has an unknown `type`, or a field has the
    /// wrong shape.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

// =============================================================================
// COMMANDS
// =============================================================================

/// UI → engine message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Build the engine. `canvasHandle`, `imagePath` and `viewport` are
    /// optional on the wire so a malformed init can be reported precisely.
    Init {
        #[serde(default)]
        canvas_handle: Option<String>,
        #[serde(default)]
        image_path: Option<String>,
        /// Raw points `[x, y, width, height]` in data space.
        #[serde(default)]
        data: Vec<[f64; 4]>,
        brush_size: f64,
        scale_factor: f64,
        #[serde(default)]
        viewport: Option<ViewportOptions>,
    },
    Wheel {
        delta_y: f64,
        #[serde(default)]
        delta_mode: u32,
        canvas_x: f64,
        canvas_y: f64,
    },
    PointerDown {
        button: i64,
        client_x: f64,
        client_y: f64,
    },
    /// `canvasX`/`canvasY` are `-1` when the pointer is outside the surface.
    PointerMove {
        client_x: f64,
        client_y: f64,
        canvas_x: f64,
        canvas_y: f64,
    },
    PointerUp {
        button: i64,
        client_x: f64,
        client_y: f64,
    },
    PointerLeave {},
    Zoom {
        scale: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center: Option<Point>,
    },
    Center {
        point: Point,
    },
    Reset {},
    Resize {
        screen_width: f64,
        screen_height: f64,
    },
    PinchStart {
        center_x: f64,
        center_y: f64,
        distance: f64,
    },
    PinchMove {
        center_x: f64,
        center_y: f64,
        distance: f64,
    },
    PinchEnd {},
    KeyDown {
        key: String,
    },
    KeyUp {
        key: String,
    },
}

impl Command {
    /// Wire name of the command, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Wheel { .. } => "wheel",
            Self::PointerDown { .. } => "pointerDown",
            Self::PointerMove { .. } => "pointerMove",
            Self::PointerUp { .. } => "pointerUp",
            Self::PointerLeave {} => "pointerLeave",
            Self::Zoom { .. } => "zoom",
            Self::Center { .. } => "center",
            Self::Reset {} => "reset",
            Self::Resize { .. } => "resize",
            Self::PinchStart { .. } => "pinchStart",
            Self::PinchMove { .. } => "pinchMove",
            Self::PinchEnd {} => "pinchEnd",
            Self::KeyDown { .. } => "keyDown",
            Self::KeyUp { .. } => "keyUp",
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Machine-readable category of an [`Event::Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `init` is missing the canvas handle, image path, or viewport block.
    InvalidInit,
    /// A command line could not be decoded.
    InvalidCommand,
    /// The rendering surface could not be claimed.
    SurfaceUnavailable,
    /// The background image failed to load; the engine runs without it.
    BackgroundLoadFailed,
    /// Viewport options or dimensions were rejected.
    InvalidViewport,
    /// Brush size or scale factor was rejected.
    InvalidContent,
}

/// Engine → UI message. State-bearing events are latest-value snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    InitComplete { state: ViewportState },
    ViewportUpdate { state: ViewportState },
    /// `null` clears the tooltip.
    TooltipUpdate { data: Option<TooltipRecord> },
    VisiblePointsUpdate { data: Vec<VisiblePoint> },
    InitialRenderComplete {},
    Error { code: ErrorCode, message: String },
}

impl Event {
    #[must_use]
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error { code, message: message.into() }
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Decode one command line.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or unknown shapes.
pub fn decode_command(line: &str) -> Result<Command, CodecError> {
    serde_json::from_str(line).map_err(CodecError::Decode)
}

/// Encode an event as a single line (no trailing newline).
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_event(event: &Event) -> Result<String, CodecError> {
    serde_json::to_string(event).map_err(CodecError::Encode)
}

/// Encode a command as a single line (UI side).
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_command(command: &Command) -> Result<String, CodecError> {
    serde_json::to_string(command).map_err(CodecError::Encode)
}

/// Decode one event line (UI side).
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or unknown shapes.
pub fn decode_event(line: &str) -> Result<Event, CodecError> {
    serde_json::from_str(line).map_err(CodecError::Decode)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
