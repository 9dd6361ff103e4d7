//! Surface hand-off: resolving an `init` canvas handle to a rendering surface.
//!
//! A handle may be claimed by one engine at a time. The claim is released
//! when the returned surface is dropped, which happens when the engine is
//! torn down or replaced by a re-init.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;
use viewport::ViewportState;
use viewport::camera::Size;
use viewport::scene::{BackgroundTexture, GlyphFrame, GlyphSheet, HeadlessScene, SpriteId, SpriteNode, Surface, TextureId};

use crate::error::BridgeError;

pub type BoxedSurface = Box<dyn Surface + Send>;

/// Resolves canvas handles to surfaces.
pub trait SurfaceProvider: Send + Sync {
    /// # Errors
    ///
    /// [`BridgeError::SurfaceUnavailable`] if the handle cannot be resolved,
    /// [`BridgeError::SurfaceAlreadyClaimed`] if another engine holds it.
    fn claim(&self, handle: &str) -> Result<BoxedSurface, BridgeError>;
}

type Registry = Arc<Mutex<HashSet<String>>>;

/// Hands out [`HeadlessScene`] surfaces for any non-empty handle.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurfaces {
    claimed: Registry,
}

impl HeadlessSurfaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_claimed(&self, handle: &str) -> bool {
        self.claimed.lock().is_ok_and(|set| set.contains(handle))
    }
}

impl SurfaceProvider for HeadlessSurfaces {
    fn claim(&self, handle: &str) -> Result<BoxedSurface, BridgeError> {
        if handle.trim().is_empty() {
            return Err(BridgeError::SurfaceUnavailable("empty canvas handle".into()));
        }
        let mut claimed = self
            .claimed
            .lock()
            .map_err(|_| BridgeError::SurfaceUnavailable("surface registry poisoned".into()))?;
        if !claimed.insert(handle.to_owned()) {
            return Err(BridgeError::SurfaceAlreadyClaimed(handle.to_owned()));
        }
        debug!(handle, "surface: claimed");
        Ok(Box::new(ClaimedScene {
            handle: handle.to_owned(),
            scene: HeadlessScene::new(),
            registry: Arc::clone(&self.claimed),
        }))
    }
}

/// A headless scene that releases its handle on drop.
#[derive(Debug)]
struct ClaimedScene {
    handle: String,
    scene: HeadlessScene,
    registry: Registry,
}

impl Drop for ClaimedScene {
    fn drop(&mut self) {
        if let Ok(mut claimed) = self.registry.lock() {
            claimed.remove(&self.handle);
        }
        debug!(handle = %self.handle, frames = self.scene.frames_presented, "surface: released");
    }
}

impl Surface for ClaimedScene {
    fn render_sheet(&mut self, sheet: &GlyphSheet) -> TextureId {
        self.scene.render_sheet(sheet)
    }

    fn add_background(&mut self, background: &BackgroundTexture, size: Size, z_index: i32) {
        self.scene.add_background(background, size, z_index);
    }

    fn add_sprite(&mut self, sprite: SpriteNode) -> SpriteId {
        self.scene.add_sprite(sprite)
    }

    fn set_sprite_frame(&mut self, sprite: SpriteId, frame: GlyphFrame) {
        self.scene.set_sprite_frame(sprite, frame);
    }

    fn set_transform(&mut self, state: ViewportState) {
        self.scene.set_transform(state);
    }

    fn present(&mut self) -> bool {
        self.scene.present()
    }
}
