//! Content builder: raw data points → indexed markers + sprites.
//!
//! Raw points are `[x, y, width, height]` in data space. `x` and `y` are
//! multiplied by the scale factor to land in world space; width and height
//! are semantic and pass through untouched. Every marker gets a bounding box
//! of ± brush size in the index and a sprite scaled so the base glyph spans
//! `2 * brush` world units.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::HashMap;

use tracing::debug;

use crate::camera::{Point, Size};
use crate::consts::{BACKGROUND_Z_INDEX, BASE_POINT_SIZE};
use crate::error::ViewportError;
use crate::index::{MarkerIndex, MarkerRecord};
use crate::scene::{BackgroundTexture, GlyphFrame, GlyphSheet, SpriteId, SpriteNode, Surface, TextureId};

/// Input to [`build_content`].
#[derive(Debug, Clone, Copy)]
pub struct ContentSource<'a> {
    pub data: &'a [[f64; 4]],
    pub brush_size: f64,
    pub scale_factor: f64,
    pub background: Option<&'a BackgroundTexture>,
}

/// Everything the engine keeps from content build.
#[derive(Debug)]
pub struct Content {
    pub index: MarkerIndex,
    pub sprites: HashMap<String, SpriteId>,
    /// Sprite scale, `brush * 2 / BASE_POINT_SIZE`.
    pub point_scale: f64,
    pub sheet: TextureId,
    /// Raw points dropped for non-finite coordinates.
    pub skipped: usize,
}

/// Sprite scale for a brush half-extent.
#[must_use]
pub fn point_scale(brush_size: f64) -> f64 {
    brush_size * 2.0 / BASE_POINT_SIZE
}

/// Build markers, index and sprites on `surface`.
///
/// The background (if any) is placed first, stretched over the full world
/// at `BACKGROUND_Z_INDEX`.
///
/// # Errors
///
/// Returns [`ViewportError::InvalidScaleFactor`] or
/// [`ViewportError::InvalidBrushSize`] when either is zero, negative or not
/// finite. Nothing is added to the surface in that case.
pub fn build_content<S: Surface + ?Sized>(
    surface: &mut S,
    source: ContentSource<'_>,
    world: Size,
) -> Result<Content, ViewportError> {
    if !(source.scale_factor.is_finite() && source.scale_factor > 0.0) {
        return Err(ViewportError::InvalidScaleFactor(source.scale_factor));
    }
    if !(source.brush_size.is_finite() && source.brush_size > 0.0) {
        return Err(ViewportError::InvalidBrushSize(source.brush_size));
    }

    if let Some(bg) = source.background {
        surface.add_background(bg, world, BACKGROUND_Z_INDEX);
    }

    let mut skipped = 0;
    let records: Vec<MarkerRecord> = source
        .data
        .iter()
        .filter_map(|&[x, y, width, height]| {
            let (x, y) = (x * source.scale_factor, y * source.scale_factor);
            if x.is_finite() && y.is_finite() {
                Some(MarkerRecord::new(x, y, width, height, source.brush_size))
            } else {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        debug!(skipped, "content: dropped non-finite points");
    }

    let sheet = surface.render_sheet(&GlyphSheet::default());
    let scale = point_scale(source.brush_size);
    let mut sprites = HashMap::with_capacity(records.len());
    for record in &records {
        let id = surface.add_sprite(SpriteNode {
            texture: sheet,
            position: Point::new(record.x, record.y),
            scale,
            frame: GlyphFrame::Normal,
        });
        sprites.insert(record.id.clone(), id);
    }

    let index = MarkerIndex::bulk_load(records);
    debug!(markers = index.len(), point_scale = scale, "content: built");
    Ok(Content { index, sprites, point_scale: scale, sheet, skipped })
}
