//! Protocol bridge: commands in, events out, around one running engine.
//!
//! DESIGN
//! ======
//! The bridge is synchronous and clock-injected. The session loop owns the
//! timers and calls in with `now`:
//!
//! - [`Bridge::handle`] applies one command. Only tooltip events come back
//!   directly; camera changes surface on the next frame.
//! - [`Bridge::on_frame`] renders. A dirty camera yields one
//!   `viewportUpdate` and (re)schedules the visibility debounce. The first
//!   presented frame yields `initialRenderComplete`.
//! - [`Bridge::on_visibility_deadline`] yields `visiblePointsUpdate` once the
//!   camera has been quiet for the debounce period.
//!
//! Tooltip hit-tests are throttled on the leading edge; samples inside the
//! interval are dropped.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use messages::{Command, Event};
use tokio::time::Instant;
use tracing::{debug, trace};
use viewport::input::Key;
use viewport::scene::Surface;
use viewport::wheel::WheelSample;
use viewport::{Engine, Point};

use crate::config::BridgeConfig;
use crate::timing::{Debounce, Throttle};

pub struct Bridge<S: Surface> {
    engine: Engine<S>,
    hit_throttle: Throttle,
    visibility: Debounce,
    initial_render_sent: bool,
}

impl<S: Surface> Bridge<S> {
    #[must_use]
    pub fn new(engine: Engine<S>, config: &BridgeConfig) -> Self {
        Self {
            engine,
            hit_throttle: Throttle::new(config.throttle),
            visibility: Debounce::new(config.debounce),
            initial_render_sent: false,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// The `initComplete` event for the freshly built engine.
    #[must_use]
    pub fn init_complete(&self) -> Event {
        Event::InitComplete { state: self.engine.core.state() }
    }

    /// Apply one command. `init` is handled by the session, never here.
    pub fn handle(&mut self, command: Command, now: Instant) -> Vec<Event> {
        trace!(kind = command.kind(), "bridge: command");
        let core = &mut self.engine.core;
        match command {
            Command::Init { .. } => {
                debug!("bridge: init reached a running engine; ignored");
            }
            Command::Wheel { delta_y, delta_mode, canvas_x, canvas_y } => {
                core.on_wheel(WheelSample { delta_y, delta_mode, position: Point::new(canvas_x, canvas_y) });
            }
            Command::PointerDown { button, client_x, client_y } => {
                core.on_pointer_down(button, Point::new(client_x, client_y));
            }
            Command::PointerMove { client_x, client_y, canvas_x, canvas_y } => {
                if is_outside(canvas_x, canvas_y) {
                    return self.leave();
                }
                core.on_pointer_move(Point::new(client_x, client_y));
                return self.hover_at(Point::new(canvas_x, canvas_y), now);
            }
            Command::PointerUp { button, .. } => core.on_pointer_up(button),
            Command::PointerLeave {} => return self.leave(),
            Command::Zoom { scale, center } => {
                core.zoom(scale, center);
            }
            Command::Center { point } => core.center(point),
            Command::Reset {} => core.reset(),
            Command::Resize { screen_width, screen_height } => core.resize(screen_width, screen_height),
            Command::PinchStart { center_x, center_y, distance } => {
                core.on_pinch_start(Point::new(center_x, center_y), distance);
            }
            Command::PinchMove { center_x, center_y, distance } => {
                core.on_pinch_move(Point::new(center_x, center_y), distance);
            }
            Command::PinchEnd {} => core.on_pinch_end(),
            Command::KeyDown { key } => core.on_key_down(Key(key)),
            Command::KeyUp { key } => core.on_key_up(&Key(key)),
        }
        Vec::new()
    }

    /// One render tick.
    pub fn on_frame(&mut self, now: Instant) -> Vec<Event> {
        let frame = self.engine.render_frame();
        let mut events = Vec::new();
        if frame.dirty {
            events.push(Event::ViewportUpdate { state: self.engine.core.state() });
            self.visibility.schedule(now);
        }
        if frame.presented && !self.initial_render_sent {
            self.initial_render_sent = true;
            events.push(Event::InitialRenderComplete {});
        }
        events
    }

    /// When the pending visible-points broadcast is due, if any.
    #[must_use]
    pub fn visibility_deadline(&self) -> Option<Instant> {
        self.visibility.deadline()
    }

    pub fn on_visibility_deadline(&mut self, now: Instant) -> Vec<Event> {
        if !self.visibility.fire(now) {
            return Vec::new();
        }
        let data = self.engine.core.visible_points();
        debug!(visible = data.len(), "bridge: visible points");
        vec![Event::VisiblePointsUpdate { data }]
    }

    fn hover_at(&mut self, canvas: Point, now: Instant) -> Vec<Event> {
        if !self.engine.core.tooltip_enabled() || !self.hit_throttle.try_acquire(now) {
            return Vec::new();
        }
        let data = self.engine.hit_test(canvas);
        vec![Event::TooltipUpdate { data }]
    }

    fn leave(&mut self) -> Vec<Event> {
        self.engine.on_pointer_leave();
        if self.engine.core.tooltip_enabled() {
            vec![Event::TooltipUpdate { data: None }]
        } else {
            Vec::new()
        }
    }
}

/// Canvas coordinates are `-1` when the pointer is off the surface.
fn is_outside(canvas_x: f64, canvas_y: f64) -> bool {
    canvas_x < 0.0 || canvas_y < 0.0
}
