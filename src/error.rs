//! Host error type and its mapping onto wire error codes.

use messages::{CodecError, ErrorCode};
use viewport::ViewportError;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("rendering surface `{0}` is already claimed")]
    SurfaceAlreadyClaimed(String),
    #[error("failed to load background `{path}`: {source}")]
    AssetLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("session channel closed")]
    ChannelClosed,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Wire code for errors reported to the UI as an `error` event.
    /// Transport failures have none: they end the session instead.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::InvalidConfig(_) => Some(ErrorCode::InvalidInit),
            Self::SurfaceUnavailable(_) | Self::SurfaceAlreadyClaimed(_) => Some(ErrorCode::SurfaceUnavailable),
            Self::AssetLoad { .. } => Some(ErrorCode::BackgroundLoadFailed),
            Self::Viewport(ViewportError::InvalidScaleFactor(_) | ViewportError::InvalidBrushSize(_)) => {
                Some(ErrorCode::InvalidContent)
            }
            Self::Viewport(_) => Some(ErrorCode::InvalidViewport),
            Self::Codec(_) => Some(ErrorCode::InvalidCommand),
            Self::Task(_) | Self::ChannelClosed | Self::Io(_) => None,
        }
    }
}
