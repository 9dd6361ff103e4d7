//! Throttle and debounce gates for the bridge.
//!
//! Both take `now` explicitly so the bridge stays synchronous and tests can
//! drive them with a paused tokio clock.

#[cfg(test)]
#[path = "timing_test.rs"]
mod timing_test;

use std::time::Duration;

use tokio::time::Instant;

/// Leading-edge throttle. Calls inside the interval are dropped, not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Whether a call at `now` may run. Records `now` when it may.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let ready = self.last.is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if ready {
            self.last = Some(now);
        }
        ready
    }
}

/// Trailing-edge debounce: fires once, `quiet` after the last schedule.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, deadline: None }
    }

    /// (Re)start the quiet period at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending call if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
