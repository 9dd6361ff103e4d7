//! Errors raised while constructing or configuring a viewport.
//!
//! Runtime input (pointer samples, wheel deltas, zoom requests) never fails:
//! invalid samples are ignored and logged. Only construction-time values that
//! would poison later arithmetic are rejected here.

/// Error returned by fallible viewport construction and configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// A data or point scale factor was zero, negative, or not finite.
    #[error("invalid scale factor: {0} (must be finite and > 0)")]
    InvalidScaleFactor(f64),
    /// A brush size was zero, negative, or not finite.
    #[error("invalid brush size: {0} (must be finite and > 0)")]
    InvalidBrushSize(f64),
    /// A screen or world extent was negative or not finite.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    /// `minScale`/`maxScale` were non-positive or inverted.
    #[error("invalid zoom limits: min {min}, max {max}")]
    InvalidZoomLimits { min: f64, max: f64 },
    /// A plugin option value was rejected during validation.
    #[error("invalid {plugin}.{key}: {reason}")]
    InvalidOption {
        plugin: &'static str,
        key: &'static str,
        reason: String,
    },
}
