//! Rendering-surface collaborator.
//!
//! The engine never rasterizes. It needs a surface that can render the
//! marker glyph sheet once, place a world-sized background, instantiate
//! positioned sprites that reference the sheet, switch a sprite between the
//! sheet's two frames, and present a frame under the camera transform.
//!
//! [`HeadlessScene`] records those calls. The host uses it when no GPU
//! surface is attached, and tests use it to observe what the engine drew.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::{Point, Size, ViewportState};
use crate::consts::{
    BASE_POINT_SIZE, POINT_HOVER_LINE_ALPHA, POINT_LINE_ALPHA, POINT_LINE_COLOR, POINT_LINE_WIDTH,
    POINT_SHEET_RESOLUTION,
};

/// Handle to a texture rendered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Handle to a sprite node owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub usize);

/// Which half of the glyph sheet a sprite shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphFrame {
    #[default]
    Normal,
    Hovered,
}

/// The two-frame marker glyph: a stroked circle at two line alphas, laid
/// out side by side in one texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSheet {
    /// Frame edge length in world units at sprite scale 1.
    pub size: f64,
    pub line_width: f64,
    pub line_color: u32,
    pub normal_alpha: f64,
    pub hovered_alpha: f64,
    pub resolution: f64,
}

impl Default for GlyphSheet {
    fn default() -> Self {
        Self {
            size: BASE_POINT_SIZE,
            line_width: POINT_LINE_WIDTH,
            line_color: POINT_LINE_COLOR,
            normal_alpha: POINT_LINE_ALPHA,
            hovered_alpha: POINT_HOVER_LINE_ALPHA,
            resolution: POINT_SHEET_RESOLUTION,
        }
    }
}

impl GlyphSheet {
    /// Circle radius inside one frame, inset so the stroke is not clipped.
    #[must_use]
    pub fn circle_radius(&self) -> f64 {
        self.size / 2.0 - self.line_width / 2.0
    }

    #[must_use]
    pub fn alpha(&self, frame: GlyphFrame) -> f64 {
        match frame {
            GlyphFrame::Normal => self.normal_alpha,
            GlyphFrame::Hovered => self.hovered_alpha,
        }
    }
}

/// A decoded background image, identified by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundTexture {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// A marker sprite: centred on `position`, uniformly scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteNode {
    pub texture: TextureId,
    pub position: Point,
    pub scale: f64,
    pub frame: GlyphFrame,
}

/// Capabilities the engine needs from a rendering surface.
pub trait Surface {
    /// Render the glyph sheet once; sprites reference the returned texture.
    fn render_sheet(&mut self, sheet: &GlyphSheet) -> TextureId;

    /// Stretch `background` over `size` world units at the given z-order.
    fn add_background(&mut self, background: &BackgroundTexture, size: Size, z_index: i32);

    fn add_sprite(&mut self, sprite: SpriteNode) -> SpriteId;

    fn set_sprite_frame(&mut self, sprite: SpriteId, frame: GlyphFrame);

    fn set_transform(&mut self, state: ViewportState);

    /// Draw one frame. Returns `true` if anything was presented.
    fn present(&mut self) -> bool;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn render_sheet(&mut self, sheet: &GlyphSheet) -> TextureId {
        (**self).render_sheet(sheet)
    }

    fn add_background(&mut self, background: &BackgroundTexture, size: Size, z_index: i32) {
        (**self).add_background(background, size, z_index);
    }

    fn add_sprite(&mut self, sprite: SpriteNode) -> SpriteId {
        (**self).add_sprite(sprite)
    }

    fn set_sprite_frame(&mut self, sprite: SpriteId, frame: GlyphFrame) {
        (**self).set_sprite_frame(sprite, frame);
    }

    fn set_transform(&mut self, state: ViewportState) {
        (**self).set_transform(state);
    }

    fn present(&mut self) -> bool {
        (**self).present()
    }
}

// =============================================================================
// HEADLESS
// =============================================================================

/// Background placement recorded by [`HeadlessScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBackground {
    pub texture: BackgroundTexture,
    pub size: Size,
    pub z_index: i32,
}

/// In-memory surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct HeadlessScene {
    pub sheets: Vec<GlyphSheet>,
    pub background: Option<PlacedBackground>,
    pub sprites: Vec<SpriteNode>,
    pub transform: Option<ViewportState>,
    pub frames_presented: u64,
    /// Sprites whose frame was switched, in order.
    pub frame_switches: Vec<(SpriteId, GlyphFrame)>,
}

impl HeadlessScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> Option<&SpriteNode> {
        self.sprites.get(id.0)
    }

    /// Sprites currently showing the hovered frame.
    #[must_use]
    pub fn hovered(&self) -> Vec<SpriteId> {
        self.sprites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.frame == GlyphFrame::Hovered)
            .map(|(i, _)| SpriteId(i))
            .collect()
    }
}

impl Surface for HeadlessScene {
    fn render_sheet(&mut self, sheet: &GlyphSheet) -> TextureId {
        self.sheets.push(*sheet);
        #[allow(clippy::cast_possible_truncation)]
        TextureId(self.sheets.len() as u32 - 1)
    }

    fn add_background(&mut self, background: &BackgroundTexture, size: Size, z_index: i32) {
        self.background = Some(PlacedBackground { texture: background.clone(), size, z_index });
    }

    fn add_sprite(&mut self, sprite: SpriteNode) -> SpriteId {
        self.sprites.push(sprite);
        SpriteId(self.sprites.len() - 1)
    }

    fn set_sprite_frame(&mut self, sprite: SpriteId, frame: GlyphFrame) {
        if let Some(node) = self.sprites.get_mut(sprite.0) {
            node.frame = frame;
            self.frame_switches.push((sprite, frame));
        }
    }

    fn set_transform(&mut self, state: ViewportState) {
        self.transform = Some(state);
    }

    fn present(&mut self) -> bool {
        self.frames_presented += 1;
        true
    }
}
