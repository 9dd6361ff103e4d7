//! Camera: uniform pan/zoom transform between world and screen space.
//!
//! DESIGN
//! ======
//! The camera stores a screen-space translation (`x`, `y`) and a single
//! uniform `scale`, so `scale.x == scale.y` holds by construction. A world
//! point `w` maps to screen as `w * scale + translation`.
//!
//! Every mutating operation sets a dirty flag. The render loop reads and
//! clears it once per frame via [`Camera::check_dirty`], which coalesces any
//! number of mutations into a single state broadcast.
//!
//! Zoom limits come from clamp-zoom options: `minScale`/`maxScale`, narrowed
//! by the optional visible-extent limits (`minWidth`, `maxHeight`, ...). The
//! clamp policy (`left/right/top/bottom`, `direction`, `underflow`) is applied
//! after pans, zooms, and resizes.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{ClampOptions, ClampZoomOptions, Underflow};
use crate::consts::RESET_SCALE;
use crate::error::ViewportError;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle given by its min/max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Square of half-extent `radius` around `center`.
    #[must_use]
    pub fn around(center: Point, radius: f64) -> Self {
        Self {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    /// Whether the two rectangles overlap; touching edges count.
    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Per-axis scale as broadcast to the UI. Always equal on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// Snapshot of the camera sent in `viewportUpdate` / `initComplete`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub x: f64,
    pub y: f64,
    pub scale: Scale,
}

/// Camera state for pan/zoom over a bounded world.
#[derive(Debug, Clone)]
pub struct Camera {
    x: f64,
    y: f64,
    scale: f64,
    screen: Size,
    world: Size,
    clamp: ClampOptions,
    zoom: ClampZoomOptions,
    dirty: bool,
}

impl Camera {
    /// Create a camera centred on the world centre at scale 1 (clamped into
    /// the zoom range), then apply the clamp policy.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidDimensions`] when either size is not
    /// finite and positive, and [`ViewportError::InvalidZoomLimits`] when
    /// `minScale`/`maxScale` are unusable.
    pub fn new(screen: Size, world: Size, clamp: ClampOptions, zoom: ClampZoomOptions) -> Result<Self, ViewportError> {
        for size in [screen, world] {
            if !size.is_valid() {
                return Err(ViewportError::InvalidDimensions { width: size.width, height: size.height });
            }
        }
        if !(zoom.min_scale > 0.0 && zoom.min_scale <= zoom.max_scale && zoom.max_scale.is_finite()) {
            return Err(ViewportError::InvalidZoomLimits { min: zoom.min_scale, max: zoom.max_scale });
        }

        let mut camera = Self { x: 0.0, y: 0.0, scale: RESET_SCALE, screen, world, clamp, zoom, dirty: true };
        camera.scale = camera.clamp_scale(RESET_SCALE);
        camera.move_to_center();
        camera.clamp();
        Ok(camera)
    }

    // --- Accessors ---

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen
    }

    #[must_use]
    pub fn world_size(&self) -> Size {
        self.world
    }

    #[must_use]
    pub fn world_center(&self) -> Point {
        Point::new(self.world.width / 2.0, self.world.height / 2.0)
    }

    #[must_use]
    pub fn screen_center(&self) -> Point {
        Point::new(self.screen.width / 2.0, self.screen.height / 2.0)
    }

    /// The effective `(min, max)` scale range.
    ///
    /// `maxWidth`/`maxHeight` raise the minimum, `minWidth`/`minHeight` lower
    /// the maximum. When the two collide the minimum wins.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        let z = &self.zoom;
        let mut min = z.min_scale;
        let mut max = z.max_scale;
        if let Some(w) = z.max_width {
            min = min.max(self.screen.width / w);
        }
        if let Some(h) = z.max_height {
            min = min.max(self.screen.height / h);
        }
        if let Some(w) = z.min_width {
            max = max.min(self.screen.width / w);
        }
        if let Some(h) = z.min_height {
            max = max.min(self.screen.height / h);
        }
        (min, max.max(min))
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        let (min, max) = self.scale_limits();
        scale.clamp(min, max)
    }

    /// The current state snapshot for broadcast.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        ViewportState { x: self.x, y: self.y, scale: Scale { x: self.scale, y: self.scale } }
    }

    /// The world-space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_bounds(&self) -> Bounds {
        Bounds {
            min_x: -self.x / self.scale,
            min_y: -self.y / self.scale,
            max_x: (-self.x + self.screen.width) / self.scale,
            max_y: (-self.y + self.screen.height) / self.scale,
        }
    }

    // --- Transforms ---

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.x) / self.scale, y: (screen.y - self.y) / self.scale }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point { x: world.x * self.scale + self.x, y: world.y * self.scale + self.y }
    }

    // --- Dirty flag ---

    /// Read and clear the dirty flag.
    pub fn check_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Read the dirty flag without clearing it.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Mutations ---

    /// Place `world` at the geometric centre of the screen.
    pub fn move_center(&mut self, world: Point) {
        if !world.is_finite() {
            trace!(?world, "camera: ignoring non-finite centre");
            return;
        }
        self.x = self.screen.width / 2.0 - world.x * self.scale;
        self.y = self.screen.height / 2.0 - world.y * self.scale;
        self.dirty = true;
    }

    /// Centre the screen on the world centre.
    pub fn move_to_center(&mut self) {
        self.move_center(self.world_center());
    }

    /// Translate by a screen-space delta. Does not clamp.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.x += dx;
        self.y += dy;
        self.dirty = true;
    }

    /// Multiply the scale by `multiplier`, keeping `anchor` (screen space)
    /// visually fixed, then clamp.
    ///
    /// Returns `false` and leaves the camera (and dirty flag) untouched when
    /// the clamped scale equals the current one, e.g. at a zoom limit.
    pub fn zoom_at(&mut self, multiplier: f64, anchor: Point) -> bool {
        if !(multiplier.is_finite() && multiplier > 0.0 && anchor.is_finite()) {
            trace!(multiplier, ?anchor, "camera: ignoring invalid zoom");
            return false;
        }
        let world_anchor = self.to_world(anchor);
        let old_scale = self.scale;
        let new_scale = self.clamp_scale(old_scale * multiplier);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            trace!(scale = old_scale, "camera: zoom limit reached");
            return false;
        }

        self.scale = new_scale;
        let moved = self.to_screen(world_anchor);
        self.x += anchor.x - moved.x;
        self.y += anchor.y - moved.y;
        self.clamp();
        self.dirty = true;
        true
    }

    /// Restore scale 1 (within the zoom range), centre on the world, clamp.
    pub fn reset(&mut self) {
        self.scale = self.clamp_scale(RESET_SCALE);
        self.move_to_center();
        self.clamp();
    }

    /// Change the screen size, keeping the world point at screen centre.
    pub fn resize(&mut self, width: f64, height: f64) {
        let size = Size::new(width, height);
        if !size.is_valid() {
            trace!(width, height, "camera: ignoring invalid resize");
            return;
        }
        let center = self.to_world(self.screen_center());
        self.screen = size;
        // Visible-extent zoom limits depend on the screen size.
        self.scale = self.clamp_scale(self.scale);
        self.move_center(center);
        self.clamp();
        self.dirty = true;
    }

    /// Apply the clamp policy on each enabled axis.
    pub fn clamp(&mut self) {
        let direction = self.clamp.direction;
        let underflow = self.clamp.underflow;
        let (old_x, old_y) = (self.x, self.y);

        if direction.clamps_x() {
            let min = self.clamp.left.unwrap_or(f64::NEG_INFINITY);
            let max = self.clamp.right.unwrap_or(f64::INFINITY);
            self.x = clamp_axis(self.x, min, max, self.screen.width, self.scale, underflow);
        }
        if direction.clamps_y() {
            let min = self.clamp.top.unwrap_or(f64::NEG_INFINITY);
            let max = self.clamp.bottom.unwrap_or(f64::INFINITY);
            self.y = clamp_axis(self.y, min, max, self.screen.height, self.scale, underflow);
        }

        #[allow(clippy::float_cmp)]
        let moved = self.x != old_x || self.y != old_y;
        if moved {
            self.dirty = true;
        }
    }
}

/// Clamp one axis of the translation against the world bounds `[min, max]`.
///
/// Content narrower than the viewport is placed per `underflow`; wider
/// content is clipped so the viewport never shows outside `[min, max]`.
fn clamp_axis(position: f64, min: f64, max: f64, screen: f64, scale: f64, underflow: Underflow) -> f64 {
    let content = max - min;
    let visible = screen / scale;

    if content <= visible {
        return match underflow {
            Underflow::Center => (screen - content * scale) / 2.0 - min * scale,
            Underflow::Start => -min * scale,
            Underflow::End => screen - max * scale,
        };
    }

    // Translation at which `min` sits on the left/top screen edge, and at
    // which `max` sits on the right/bottom edge.
    let upper = -min * scale;
    let lower = screen - max * scale;
    if position > upper {
        upper
    } else if position < lower {
        lower
    } else {
        position
    }
}
