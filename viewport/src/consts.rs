//! Shared numeric constants for the viewport crate.

// ── Viewport ────────────────────────────────────────────────────

/// Screen and world extent used when a dimension is missing or zero.
pub const DEFAULT_EXTENT: f64 = 800.0;

/// Scale restored by a reset, before clamping into the zoom range.
pub const RESET_SCALE: f64 = 1.0;

// ── Zoom curve ──────────────────────────────────────────────────

/// Divisor turning a raw wheel/pinch delta into an exponent step.
pub const ZOOM_STEP_DIVISOR: f64 = 1000.0;

/// `WheelEvent.deltaMode` value for line-based scrolling.
pub const DELTA_MODE_LINE: u32 = 1;

// ── Marker glyphs ───────────────────────────────────────────────

/// Edge length of the base marker glyph, in sheet pixels.
pub const BASE_POINT_SIZE: f64 = 8.0;

/// Stroke width of the marker circle.
pub const POINT_LINE_WIDTH: f64 = 1.0;

/// Stroke colour of the marker circle (`0xRRGGBB`).
pub const POINT_LINE_COLOR: u32 = 0x00dc_2626;

/// Stroke alpha of a marker at rest.
pub const POINT_LINE_ALPHA: f64 = 0.5;

/// Stroke alpha of the hovered marker.
pub const POINT_HOVER_LINE_ALPHA: f64 = 1.0;

/// Rasterization resolution multiplier for the glyph sheet.
pub const POINT_SHEET_RESOLUTION: f64 = 2.0;

/// Z order of the background image; markers sit above it at 0.
pub const BACKGROUND_Z_INDEX: i32 = -1;
