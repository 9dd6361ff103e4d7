//! Drag plugin: pointer-drag panning and wheel scrolling.
//!
//! State machine: `Idle` → (allowed button down, key held) → `Dragging` →
//! (allowed button up, or pointer leaves) → `Idle`. Each move while dragging
//! yields the screen-space delta since the previous sample, scaled by
//! `factor` and masked by `direction`.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::camera::Point;
use crate::config::{DragOptions, MouseButtons};
use crate::input::{Button, PanDelta, PressedKeys};

impl MouseButtons {
    /// Whether `button` is in this set.
    #[must_use]
    pub fn allows(self, button: Button) -> bool {
        match self {
            Self::All => true,
            Self::Left => button == Button::Primary,
            Self::Middle => button == Button::Middle,
            Self::Right => button == Button::Secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: Point },
}

#[derive(Debug, Clone)]
pub struct DragPlugin {
    options: DragOptions,
    state: DragState,
}

impl DragPlugin {
    #[must_use]
    pub fn new(options: DragOptions) -> Self {
        Self { options, state: DragState::Idle }
    }

    #[must_use]
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag if the button and key gate allow it. Returns whether a
    /// drag began.
    pub fn on_pointer_down(&mut self, button: Button, position: Point, keys: &PressedKeys) -> bool {
        let allowed = self.options.press_drag
            && self.options.mouse_buttons.allows(button)
            && keys.satisfies(self.options.key_to_press.as_deref())
            && position.is_finite();
        if allowed {
            self.state = DragState::Dragging { last: position };
        }
        allowed
    }

    /// Delta since the previous sample, or `None` when not dragging.
    pub fn on_pointer_move(&mut self, position: Point) -> Option<PanDelta> {
        let DragState::Dragging { last } = self.state else {
            return None;
        };
        if !position.is_finite() {
            return None;
        }
        self.state = DragState::Dragging { last: position };

        let factor = self.options.factor;
        let direction = self.options.direction;
        let dx = if direction.allows_x() { (position.x - last.x) * factor } else { 0.0 };
        let dy = if direction.allows_y() { (position.y - last.y) * factor } else { 0.0 };
        Some(PanDelta { dx, dy })
    }

    /// End the drag if `button` is one that could have started it.
    pub fn on_pointer_up(&mut self, button: Button) {
        if self.options.mouse_buttons.allows(button) {
            self.state = DragState::Idle;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }

    /// Pan from a wheel event when `drag.wheel` is enabled. `delta_y` is
    /// already normalised to pixels.
    #[must_use]
    pub fn on_wheel(&self, delta_y: f64, keys: &PressedKeys) -> Option<PanDelta> {
        if !self.options.wheel || !delta_y.is_finite() || !keys.satisfies(self.options.key_to_press.as_deref()) {
            return None;
        }
        let sign = if self.options.reverse { 1.0 } else { -1.0 };
        let dy = if self.options.direction.allows_y() { delta_y * self.options.wheel_scroll * sign } else { 0.0 };
        Some(PanDelta { dx: 0.0, dy })
    }
}
