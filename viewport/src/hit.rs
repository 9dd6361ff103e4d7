//! Hit-testing results and hover tracking.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::BASE_POINT_SIZE;
use crate::index::MarkerRecord;

/// Tooltip payload for the marker under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRecord {
    /// Marker centre in screen space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Marker centre in world space.
    pub original_x: f64,
    pub original_y: f64,
}

impl TooltipRecord {
    #[must_use]
    pub fn from_marker(marker: &MarkerRecord, camera: &Camera) -> Self {
        let screen = camera.to_screen(marker.center());
        Self {
            x: screen.x,
            y: screen.y,
            width: marker.width,
            height: marker.height,
            original_x: marker.x,
            original_y: marker.y,
        }
    }
}

/// World-space interaction radius for a glyph drawn at `point_scale`.
///
/// The base glyph is `BASE_POINT_SIZE` across, so this equals the brush size.
#[must_use]
pub fn hit_radius(point_scale: f64) -> f64 {
    BASE_POINT_SIZE / 2.0 * point_scale
}

/// Identities whose hover state must change after a hit-test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub unhover: Option<String>,
    pub hover: Option<String>,
}

impl HoverChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unhover.is_none() && self.hover.is_none()
    }
}

/// Remembers the last hovered marker so only changes are applied.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    current: Option<String>,
}

impl HoverTracker {
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Record the newest hit. Returns an empty change when the identity is
    /// unchanged, otherwise at most the old and new identities.
    pub fn update(&mut self, hit: Option<&str>) -> HoverChange {
        if self.current.as_deref() == hit {
            return HoverChange::default();
        }
        let previous = self.current.take();
        self.current = hit.map(str::to_owned);
        HoverChange { unhover: previous, hover: self.current.clone() }
    }

    /// Forget the hovered marker, returning it for unhighlighting.
    pub fn clear(&mut self) -> HoverChange {
        self.update(None)
    }
}
