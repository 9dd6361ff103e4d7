//! Input model: buttons, keys, and the camera instructions plugins produce.
//!
//! Plugins never touch the camera. They consume raw samples and return a
//! [`PanDelta`] or a [`ZoomStep`]; the engine applies those to the camera and
//! clamps afterwards.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::camera::Point;
use crate::consts::ZOOM_STEP_DIVISOR;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Back/forward buttons map to `None`.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key, named as the platform reports it (e.g. `"Shift"`, `"Space"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

/// Keys currently held, fed by `keyDown` / `keyUp`.
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    /// Key names, so a gate check is a single lookup.
    held: HashSet<String>,
}

impl PressedKeys {
    pub fn press(&mut self, key: Key) {
        self.held.insert(key.0);
    }

    pub fn release(&mut self, key: &Key) {
        self.held.remove(&key.0);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Whether a plugin gated on `required` may act. No requirement always passes.
    #[must_use]
    pub fn satisfies(&self, required: Option<&str>) -> bool {
        required.is_none_or(|name| self.held.contains(name))
    }
}

/// Screen-space translation produced by drag or pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Zoom instruction: multiply the scale, keeping `anchor` fixed on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep {
    pub multiplier: f64,
    pub anchor: Point,
}

/// Exponential response curve shared by wheel and pinch.
///
/// `percent` tunes sensitivity while `curve(d) * curve(-d) == 1`, so equal and
/// opposite deltas cancel.
#[must_use]
pub fn zoom_multiplier(percent: f64, delta: f64) -> f64 {
    let step = delta / ZOOM_STEP_DIVISOR;
    2f64.powf((1.0 + percent) * step)
}
