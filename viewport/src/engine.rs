//! Engine: camera + plugins + index, driven by input samples.
//!
//! DESIGN
//! ======
//! [`EngineCore`] holds everything that does not touch a rendering surface:
//! camera, resolved plugin configuration, plugin state machines, held keys,
//! the marker index and hover tracking. Every handler mutates the camera only
//! through camera operations and clamps after pans.
//!
//! [`Engine`] wraps the core and owns the surface. It builds content at
//! construction, applies hover frame switches to at most two sprites per
//! hit-test, and pushes the camera transform to the surface once per frame.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::camera::{Camera, Point, Size, ViewportState};
use crate::config::{PluginConfig, ViewportOptions};
use crate::content::{ContentSource, build_content};
use crate::drag::DragPlugin;
use crate::error::ViewportError;
use crate::hit::{HoverChange, HoverTracker, TooltipRecord, hit_radius};
use crate::index::{MarkerIndex, VisiblePoint};
use crate::input::{Button, Key, PanDelta, PressedKeys};
use crate::pinch::PinchPlugin;
use crate::scene::{BackgroundTexture, GlyphFrame, SpriteId, Surface};
use crate::wheel::{WheelPlugin, WheelSample};

/// Result of one hit-test: the tooltip plus the hover identities to switch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitOutcome {
    pub tooltip: Option<TooltipRecord>,
    pub hover: HoverChange,
}

/// Core engine state, independent of any rendering surface.
#[derive(Debug)]
pub struct EngineCore {
    camera: Camera,
    config: PluginConfig,
    drag: DragPlugin,
    wheel: WheelPlugin,
    pinch: PinchPlugin,
    keys: PressedKeys,
    index: MarkerIndex,
    hover: HoverTracker,
    point_scale: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(camera: Camera, config: PluginConfig, index: MarkerIndex, point_scale: f64) -> Self {
        Self {
            camera,
            drag: DragPlugin::new(config.drag.clone()),
            wheel: WheelPlugin::new(config.wheel.clone()),
            pinch: PinchPlugin::new(config.pinch.clone()),
            config,
            keys: PressedKeys::default(),
            index,
            hover: HoverTracker::default(),
            point_scale,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &MarkerIndex {
        &self.index
    }

    #[must_use]
    pub fn tooltip_enabled(&self) -> bool {
        self.config.tooltip.enabled
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hover.current()
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.camera.state()
    }

    /// Read and clear the camera's dirty flag.
    pub fn check_dirty(&mut self) -> bool {
        self.camera.check_dirty()
    }

    // --- Input ---

    /// Zoom (or pan, with `drag.wheel`) from a wheel event.
    pub fn on_wheel(&mut self, sample: WheelSample) {
        if self.config.drag.wheel {
            let delta = self.wheel.pixel_delta(&sample);
            if let Some(pan) = self.drag.on_wheel(delta, &self.keys) {
                self.camera.move_by(pan.dx, pan.dy);
                if self.config.drag.clamp_wheel {
                    self.camera.clamp();
                }
            }
            return;
        }
        if let Some(step) = self.wheel.on_wheel(&sample, &self.keys) {
            self.camera.zoom_at(step.multiplier, step.anchor);
        }
    }

    /// Returns whether a drag started.
    pub fn on_pointer_down(&mut self, button: i64, position: Point) -> bool {
        let Some(button) = Button::from_code(button) else {
            trace!(button, "engine: ignoring unmapped button");
            return false;
        };
        self.drag.on_pointer_down(button, position, &self.keys)
    }

    /// Pan by the drag delta, if dragging.
    pub fn on_pointer_move(&mut self, position: Point) {
        if let Some(delta) = self.drag.on_pointer_move(position) {
            self.pan(delta);
        }
    }

    pub fn on_pointer_up(&mut self, button: i64) {
        if let Some(button) = Button::from_code(button) {
            self.drag.on_pointer_up(button);
        }
    }

    /// End any drag and drop hover state.
    pub fn on_pointer_leave(&mut self) -> HoverChange {
        self.drag.on_pointer_leave();
        self.hover.clear()
    }

    /// Begin a pinch. Cancels any drag in progress.
    pub fn on_pinch_start(&mut self, midpoint: Point, distance: f64) {
        self.drag.on_pointer_leave();
        self.pinch.on_start(midpoint, distance);
    }

    pub fn on_pinch_move(&mut self, midpoint: Point, distance: f64) {
        let Some(step) = self.pinch.on_move(midpoint, distance) else {
            return;
        };
        if let Some(delta) = step.pan {
            self.pan(delta);
        }
        self.camera.zoom_at(step.zoom.multiplier, step.zoom.anchor);
    }

    pub fn on_pinch_end(&mut self) {
        self.pinch.on_end();
    }

    pub fn on_key_down(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn on_key_up(&mut self, key: &Key) {
        self.keys.release(key);
    }

    fn pan(&mut self, delta: PanDelta) {
        self.camera.move_by(delta.dx, delta.dy);
        self.camera.clamp();
    }

    // --- Commands ---

    /// Zoom by `scale` about `center` (screen space), or the screen centre.
    /// Non-positive or non-finite scales are ignored.
    pub fn zoom(&mut self, scale: f64, center: Option<Point>) -> bool {
        if !(scale.is_finite() && scale > 0.0) {
            debug!(scale, "engine: ignoring invalid zoom");
            return false;
        }
        let anchor = center.unwrap_or_else(|| self.camera.screen_center());
        self.camera.zoom_at(scale, anchor)
    }

    /// Put the world point at screen centre, then clamp.
    pub fn center(&mut self, point: Point) {
        self.camera.move_center(point);
        self.camera.clamp();
    }

    pub fn reset(&mut self) {
        self.camera.reset();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
    }

    // --- Queries ---

    /// Find the marker under a screen point and update hover state.
    pub fn hit_test(&mut self, screen: Point) -> HitOutcome {
        if !screen.is_finite() {
            return HitOutcome { tooltip: None, hover: self.hover.clear() };
        }
        let world = self.camera.to_world(screen);
        let radius = hit_radius(self.point_scale);
        let hit = self.index.nearest_within(world, radius);
        let hover = self.hover.update(hit.map(|m| m.id.as_str()));
        let tooltip = hit.map(|m| TooltipRecord::from_marker(m, &self.camera));
        HitOutcome { tooltip, hover }
    }

    /// Markers intersecting the visible world rectangle.
    #[must_use]
    pub fn visible_points(&self) -> Vec<VisiblePoint> {
        self.index.visible(&self.camera.visible_bounds())
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Everything needed to build an [`Engine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineInit<'a> {
    pub viewport: &'a ViewportOptions,
    pub data: &'a [[f64; 4]],
    pub brush_size: f64,
    pub scale_factor: f64,
    pub background: Option<&'a BackgroundTexture>,
}

/// What a frame tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The camera changed since the previous frame.
    pub dirty: bool,
    pub presented: bool,
}

/// The full engine: core state plus the surface it draws on.
#[derive(Debug)]
pub struct Engine<S: Surface> {
    pub core: EngineCore,
    surface: S,
    sprites: HashMap<String, SpriteId>,
}

impl<S: Surface> Engine<S> {
    /// Resolve options, build the camera, then build content on `surface`.
    ///
    /// # Errors
    ///
    /// Propagates option, dimension, scale-factor and brush-size validation
    /// failures. The surface is dropped with the error.
    pub fn new(mut surface: S, init: EngineInit<'_>) -> Result<Self, ViewportError> {
        let config = PluginConfig::from_overrides(init.viewport.plugin_options.clone())?;
        let (sw, sh) = init.viewport.screen_size();
        let (ww, wh) = init.viewport.world_size();
        let world = Size::new(ww, wh);
        let camera = Camera::new(Size::new(sw, sh), world, config.clamp, config.clamp_zoom)?;

        let content = build_content(
            &mut surface,
            ContentSource {
                data: init.data,
                brush_size: init.brush_size,
                scale_factor: init.scale_factor,
                background: init.background,
            },
            world,
        )?;
        surface.set_transform(camera.state());

        debug!(markers = content.index.len(), scale = camera.scale(), "engine: built");
        let core = EngineCore::new(camera, config, content.index, content.point_scale);
        Ok(Self { core, surface, sprites: content.sprites })
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hit-test and switch sprite frames for the hover change.
    pub fn hit_test(&mut self, screen: Point) -> Option<TooltipRecord> {
        let outcome = self.core.hit_test(screen);
        self.apply_hover(&outcome.hover);
        outcome.tooltip
    }

    /// End drags and unhighlight the hovered marker.
    pub fn on_pointer_leave(&mut self) {
        let change = self.core.on_pointer_leave();
        self.apply_hover(&change);
    }

    /// One frame tick: consume the dirty flag, sync the transform, present.
    pub fn render_frame(&mut self) -> FrameOutcome {
        let dirty = self.core.check_dirty();
        if dirty {
            self.surface.set_transform(self.core.state());
        }
        let presented = self.surface.present();
        FrameOutcome { dirty, presented }
    }

    fn apply_hover(&mut self, change: &HoverChange) {
        for (id, frame) in [(&change.unhover, GlyphFrame::Normal), (&change.hover, GlyphFrame::Hovered)] {
            if let Some(sprite) = id.as_ref().and_then(|id| self.sprites.get(id)) {
                self.surface.set_sprite_frame(*sprite, frame);
            }
        }
    }
}
