//! Pinch plugin: two-finger zoom, with optional midpoint panning.

#[cfg(test)]
#[path = "pinch_test.rs"]
mod pinch_test;

use crate::camera::Point;
use crate::config::PinchOptions;
use crate::input::{PanDelta, ZoomStep, zoom_multiplier};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchState {
    Idle,
    Active { anchor: Point, last_distance: f64 },
}

/// Camera instructions for one pinch sample. Pan is applied before zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchStep {
    pub pan: Option<PanDelta>,
    pub zoom: ZoomStep,
}

#[derive(Debug, Clone)]
pub struct PinchPlugin {
    options: PinchOptions,
    state: PinchState,
}

impl PinchPlugin {
    #[must_use]
    pub fn new(options: PinchOptions) -> Self {
        Self { options, state: PinchState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> PinchState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, PinchState::Active { .. })
    }

    /// Record the starting midpoint and finger distance.
    pub fn on_start(&mut self, midpoint: Point, distance: f64) {
        if !midpoint.is_finite() || !distance.is_finite() || distance <= 0.0 {
            self.state = PinchState::Idle;
            return;
        }
        self.state = PinchState::Active { anchor: midpoint, last_distance: distance };
    }

    /// Zoom by the distance change since the last sample. Unless `noDrag`,
    /// the midpoint's movement pans the camera and the anchor follows it.
    pub fn on_move(&mut self, midpoint: Point, distance: f64) -> Option<PinchStep> {
        let PinchState::Active { anchor, last_distance } = self.state else {
            return None;
        };
        if !midpoint.is_finite() || !distance.is_finite() || distance <= 0.0 {
            return None;
        }

        let (pan, next_anchor) = if self.options.no_drag {
            (None, anchor)
        } else {
            (Some(PanDelta { dx: midpoint.x - anchor.x, dy: midpoint.y - anchor.y }), midpoint)
        };
        self.state = PinchState::Active { anchor: next_anchor, last_distance: distance };

        let multiplier = zoom_multiplier(self.options.percent, distance - last_distance);
        let anchor = self.options.center.unwrap_or(next_anchor);
        Some(PinchStep { pan, zoom: ZoomStep { multiplier, anchor } })
    }

    pub fn on_end(&mut self) {
        self.state = PinchState::Idle;
    }
}
