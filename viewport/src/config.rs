//! Plugin configuration: typed options, defaults, and override merging.
//!
//! DESIGN
//! ======
//! Every plugin has a fully-populated options struct with explicit defaults
//! and a matching `*Overrides` struct where every key is optional. Overrides
//! arrive as JSON inside the `init` command, are parsed with
//! `deny_unknown_fields`, and are merged key-by-key exactly once when the
//! engine is constructed. Nullable keys (`center`, `keyToPress`, clamp bounds,
//! clamp-zoom extents) use a double `Option` so an explicit `null` can clear a
//! default while an absent key keeps it.
//!
//! After merging, [`PluginConfig::validate`] rejects values that would poison
//! camera arithmetic later (non-finite numbers, non-positive scale limits,
//! inverted bounds).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::camera::Point;
use crate::consts::DEFAULT_EXTENT;
use crate::error::ViewportError;

// =============================================================================
// OPTION ENUMS
// =============================================================================

/// Axes a drag is allowed to move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    All,
    X,
    Y,
}

impl Direction {
    #[must_use]
    pub fn allows_x(self) -> bool {
        matches!(self, Self::All | Self::X)
    }

    #[must_use]
    pub fn allows_y(self) -> bool {
        matches!(self, Self::All | Self::Y)
    }
}

/// Axes the clamp policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClampDirection {
    #[default]
    All,
    X,
    Y,
    None,
}

impl ClampDirection {
    #[must_use]
    pub fn clamps_x(self) -> bool {
        matches!(self, Self::All | Self::X)
    }

    #[must_use]
    pub fn clamps_y(self) -> bool {
        matches!(self, Self::All | Self::Y)
    }
}

/// Placement of content that is smaller than the viewport along an axis.
///
/// `left`/`top` are accepted as aliases of `start`, `right`/`bottom` as
/// aliases of `end`, on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Underflow {
    #[default]
    Center,
    #[serde(alias = "left", alias = "top")]
    Start,
    #[serde(alias = "right", alias = "bottom")]
    End,
}

/// Which mouse buttons start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButtons {
    All,
    #[default]
    Left,
    Middle,
    Right,
}

/// Axis the wheel zooms along. Zoom is always uniform; kept for option parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelAxis {
    #[default]
    All,
    X,
    Y,
}

// =============================================================================
// RESOLVED OPTIONS
// =============================================================================

/// Resolved drag plugin options.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOptions {
    pub direction: Direction,
    pub press_drag: bool,
    /// Wheel pans instead of zooming.
    pub wheel: bool,
    pub wheel_scroll: f64,
    pub reverse: bool,
    pub clamp_wheel: bool,
    pub underflow: Underflow,
    pub factor: f64,
    pub mouse_buttons: MouseButtons,
    pub key_to_press: Option<String>,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            direction: Direction::All,
            press_drag: true,
            wheel: false,
            wheel_scroll: 1.0,
            reverse: false,
            clamp_wheel: false,
            underflow: Underflow::Center,
            factor: 1.0,
            mouse_buttons: MouseButtons::Left,
            key_to_press: None,
        }
    }
}

/// Resolved wheel plugin options.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelOptions {
    pub percent: f64,
    pub smooth: bool,
    pub interrupt: bool,
    pub reverse: bool,
    /// Fixed screen-space zoom anchor; the event position when `None`.
    pub center: Option<Point>,
    /// Pixels per line for `deltaMode == 1` events.
    pub line_height: f64,
    pub axis: WheelAxis,
    pub key_to_press: Option<String>,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            percent: 0.1,
            smooth: false,
            interrupt: true,
            reverse: false,
            center: None,
            line_height: 20.0,
            axis: WheelAxis::All,
            key_to_press: None,
        }
    }
}

/// Resolved pinch plugin options.
#[derive(Debug, Clone, PartialEq)]
pub struct PinchOptions {
    pub percent: f64,
    /// Disable panning from two-finger midpoint movement.
    pub no_drag: bool,
    pub center: Option<Point>,
}

impl Default for PinchOptions {
    fn default() -> Self {
        Self { percent: 1.0, no_drag: false, center: None }
    }
}

/// Resolved clamp options. A `None` bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClampOptions {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub direction: ClampDirection,
    pub underflow: Underflow,
}

/// Resolved clamp-zoom options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampZoomOptions {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Smallest visible world width; caps the maximum scale.
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    /// Largest visible world width; raises the minimum scale.
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Default for ClampZoomOptions {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
        }
    }
}

/// Resolved tooltip options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipOptions {
    pub enabled: bool,
}

/// All plugin options, resolved. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluginConfig {
    pub drag: DragOptions,
    pub wheel: WheelOptions,
    pub pinch: PinchOptions,
    pub clamp: ClampOptions,
    pub clamp_zoom: ClampZoomOptions,
    pub tooltip: TooltipOptions,
}

// =============================================================================
// OVERRIDES
// =============================================================================

/// Deserialize a nullable key: absent → `None`, `null` → `Some(None)`.
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// User overrides for the drag plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DragOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press_drag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_scroll: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp_wheel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underflow: Option<Underflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_buttons: Option<MouseButtons>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub key_to_press: Option<Option<String>>,
}

/// User overrides for the wheel plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WheelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub center: Option<Option<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<WheelAxis>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub key_to_press: Option<Option<String>>,
}

/// User overrides for the pinch plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PinchOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_drag: Option<bool>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub center: Option<Option<Point>>,
}

/// User overrides for the clamp policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClampOverrides {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub left: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub right: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub top: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<ClampDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underflow: Option<Underflow>,
}

/// User overrides for clamp-zoom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClampZoomOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub min_width: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub min_height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub max_height: Option<Option<f64>>,
}

/// User overrides for the tooltip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TooltipOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Partial plugin options supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag: Option<DragOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel: Option<WheelOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch: Option<PinchOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp: Option<ClampOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp_zoom: Option<ClampZoomOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOverrides>,
}

/// The `viewport` block of an `init` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportOptions {
    #[serde(default)]
    pub screen_width: f64,
    #[serde(default)]
    pub screen_height: f64,
    #[serde(default)]
    pub world_width: f64,
    #[serde(default)]
    pub world_height: f64,
    #[serde(default, alias = "plugins")]
    pub plugin_options: PluginOverrides,
}

impl ViewportOptions {
    /// Screen `(width, height)`, substituting the default for zero extents.
    #[must_use]
    pub fn screen_size(&self) -> (f64, f64) {
        (or_default_extent(self.screen_width), or_default_extent(self.screen_height))
    }

    /// World `(width, height)`, substituting the default for zero extents.
    #[must_use]
    pub fn world_size(&self) -> (f64, f64) {
        (or_default_extent(self.world_width), or_default_extent(self.world_height))
    }
}

#[allow(clippy::float_cmp)]
fn or_default_extent(value: f64) -> f64 {
    if value == 0.0 { DEFAULT_EXTENT } else { value }
}

// =============================================================================
// MERGE
// =============================================================================

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl DragOptions {
    fn apply(&mut self, o: DragOverrides) {
        merge(&mut self.direction, o.direction);
        merge(&mut self.press_drag, o.press_drag);
        merge(&mut self.wheel, o.wheel);
        merge(&mut self.wheel_scroll, o.wheel_scroll);
        merge(&mut self.reverse, o.reverse);
        merge(&mut self.clamp_wheel, o.clamp_wheel);
        merge(&mut self.underflow, o.underflow);
        merge(&mut self.factor, o.factor);
        merge(&mut self.mouse_buttons, o.mouse_buttons);
        merge(&mut self.key_to_press, o.key_to_press);
    }
}

impl WheelOptions {
    fn apply(&mut self, o: WheelOverrides) {
        merge(&mut self.percent, o.percent);
        merge(&mut self.smooth, o.smooth);
        merge(&mut self.interrupt, o.interrupt);
        merge(&mut self.reverse, o.reverse);
        merge(&mut self.center, o.center);
        merge(&mut self.line_height, o.line_height);
        merge(&mut self.axis, o.axis);
        merge(&mut self.key_to_press, o.key_to_press);
    }
}

impl PinchOptions {
    fn apply(&mut self, o: PinchOverrides) {
        merge(&mut self.percent, o.percent);
        merge(&mut self.no_drag, o.no_drag);
        merge(&mut self.center, o.center);
    }
}

impl ClampOptions {
    fn apply(&mut self, o: ClampOverrides) {
        merge(&mut self.left, o.left);
        merge(&mut self.right, o.right);
        merge(&mut self.top, o.top);
        merge(&mut self.bottom, o.bottom);
        merge(&mut self.direction, o.direction);
        merge(&mut self.underflow, o.underflow);
    }
}

impl ClampZoomOptions {
    fn apply(&mut self, o: ClampZoomOverrides) {
        merge(&mut self.min_scale, o.min_scale);
        merge(&mut self.max_scale, o.max_scale);
        merge(&mut self.min_width, o.min_width);
        merge(&mut self.min_height, o.min_height);
        merge(&mut self.max_width, o.max_width);
        merge(&mut self.max_height, o.max_height);
    }
}

impl PluginConfig {
    /// Merge user overrides over the defaults and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidOption`] or
    /// [`ViewportError::InvalidZoomLimits`] when a merged value is unusable.
    pub fn from_overrides(overrides: PluginOverrides) -> Result<Self, ViewportError> {
        let mut config = Self::default();
        if let Some(o) = overrides.drag {
            config.drag.apply(o);
        }
        if let Some(o) = overrides.wheel {
            config.wheel.apply(o);
        }
        if let Some(o) = overrides.pinch {
            config.pinch.apply(o);
        }
        if let Some(o) = overrides.clamp {
            config.clamp.apply(o);
        }
        if let Some(o) = overrides.clamp_zoom {
            config.clamp_zoom.apply(o);
        }
        if let Some(o) = overrides.tooltip {
            merge(&mut config.tooltip.enabled, o.enabled);
        }
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric option for values the camera cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first offending option.
    pub fn validate(&self) -> Result<(), ViewportError> {
        positive("drag", "factor", self.drag.factor)?;
        finite("drag", "wheelScroll", self.drag.wheel_scroll)?;
        curve_percent("wheel", self.wheel.percent)?;
        positive("wheel", "lineHeight", self.wheel.line_height)?;
        curve_percent("pinch", self.pinch.percent)?;
        if let Some(c) = self.wheel.center {
            finite("wheel", "center", c.x)?;
            finite("wheel", "center", c.y)?;
        }
        if let Some(c) = self.pinch.center {
            finite("pinch", "center", c.x)?;
            finite("pinch", "center", c.y)?;
        }

        let clamp = &self.clamp;
        for (key, bound) in [("left", clamp.left), ("right", clamp.right), ("top", clamp.top), ("bottom", clamp.bottom)] {
            if let Some(v) = bound {
                finite("clamp", key, v)?;
            }
        }
        ordered("right", clamp.left, clamp.right)?;
        ordered("bottom", clamp.top, clamp.bottom)?;

        let zoom = &self.clamp_zoom;
        let limits_ok = zoom.min_scale.is_finite()
            && zoom.max_scale.is_finite()
            && zoom.min_scale > 0.0
            && zoom.min_scale <= zoom.max_scale;
        if !limits_ok {
            return Err(ViewportError::InvalidZoomLimits { min: zoom.min_scale, max: zoom.max_scale });
        }
        for (key, extent) in [
            ("minWidth", zoom.min_width),
            ("minHeight", zoom.min_height),
            ("maxWidth", zoom.max_width),
            ("maxHeight", zoom.max_height),
        ] {
            if let Some(v) = extent {
                positive("clampZoom", key, v)?;
            }
        }
        Ok(())
    }
}

fn finite(plugin: &'static str, key: &'static str, value: f64) -> Result<(), ViewportError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ViewportError::InvalidOption { plugin, key, reason: format!("{value} is not finite") })
    }
}

fn positive(plugin: &'static str, key: &'static str, value: f64) -> Result<(), ViewportError> {
    finite(plugin, key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidOption { plugin, key, reason: format!("{value} must be > 0") })
    }
}

/// The zoom curve `2^((1 + percent) * step)` flips direction at `percent <= -1`.
fn curve_percent(plugin: &'static str, value: f64) -> Result<(), ViewportError> {
    finite(plugin, "percent", value)?;
    if value > -1.0 {
        Ok(())
    } else {
        Err(ViewportError::InvalidOption { plugin, key: "percent", reason: format!("{value} must be > -1") })
    }
}

fn ordered(key: &'static str, min: Option<f64>, max: Option<f64>) -> Result<(), ViewportError> {
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => Err(ViewportError::InvalidOption {
            plugin: "clamp",
            key,
            reason: format!("{hi} is below the opposite bound {lo}"),
        }),
        _ => Ok(()),
    }
}
