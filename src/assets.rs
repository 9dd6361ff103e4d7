//! Background image loading.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use tracing::debug;
use viewport::scene::BackgroundTexture;

use crate::error::BridgeError;

/// Loads the background named by an `init` command. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AssetLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns [`BridgeError::AssetLoad`] if the image cannot be read or
    /// decoded.
    async fn load_background(&self, path: &str) -> Result<BackgroundTexture, BridgeError>;
}

/// Decodes images from the local filesystem on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileLoader;

#[async_trait::async_trait]
impl AssetLoader for ImageFileLoader {
    async fn load_background(&self, path: &str) -> Result<BackgroundTexture, BridgeError> {
        let owned = path.to_owned();
        let decoded = tokio::task::spawn_blocking(move || image::open(&owned)).await?;
        let img = decoded.map_err(|source| BridgeError::AssetLoad { path: path.to_owned(), source })?;
        debug!(path, width = img.width(), height = img.height(), "assets: background decoded");
        Ok(BackgroundTexture { source: path.to_owned(), width: img.width(), height: img.height() })
    }
}
