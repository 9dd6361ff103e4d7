//! Wheel plugin: exponential zoom about the cursor.

#[cfg(test)]
#[path = "wheel_test.rs"]
mod wheel_test;

use crate::camera::Point;
use crate::config::WheelOptions;
use crate::consts::DELTA_MODE_LINE;
use crate::input::{PressedKeys, ZoomStep, zoom_multiplier};

/// One wheel event as received from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSample {
    pub delta_y: f64,
    pub delta_mode: u32,
    pub position: Point,
}

#[derive(Debug, Clone)]
pub struct WheelPlugin {
    options: WheelOptions,
}

impl WheelPlugin {
    #[must_use]
    pub fn new(options: WheelOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    /// Vertical delta in pixels. Line-mode deltas are multiplied by `lineHeight`.
    #[must_use]
    pub fn pixel_delta(&self, sample: &WheelSample) -> f64 {
        if sample.delta_mode == DELTA_MODE_LINE { sample.delta_y * self.options.line_height } else { sample.delta_y }
    }

    /// Zoom instruction for `sample`, or `None` when gated or degenerate.
    ///
    /// Scrolling up (negative `deltaY`) zooms in unless `reverse` is set. The
    /// anchor is the configured `center`, else the cursor.
    #[must_use]
    pub fn on_wheel(&self, sample: &WheelSample, keys: &PressedKeys) -> Option<ZoomStep> {
        if !keys.satisfies(self.options.key_to_press.as_deref()) {
            return None;
        }
        let delta = self.pixel_delta(sample);
        if !delta.is_finite() || delta.abs() < f64::EPSILON {
            return None;
        }
        let sign = if self.options.reverse { -1.0 } else { 1.0 };
        let multiplier = zoom_multiplier(self.options.percent, sign * -delta);
        let anchor = self.options.center.unwrap_or(sample.position);
        Some(ZoomStep { multiplier, anchor })
    }
}
