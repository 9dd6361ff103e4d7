//! Host timing and capacity settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::BridgeError;

pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_THROTTLE_MS: u64 = 16;
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
pub const DEFAULT_PENDING_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Render loop period.
    pub frame_interval: Duration,
    /// Minimum spacing between tooltip hit-tests.
    pub throttle: Duration,
    /// Quiet period before a visible-points broadcast.
    pub debounce: Duration,
    /// Capacity of the command and event channels.
    pub channel_capacity: usize,
    /// Commands held while waiting for `init`.
    pub pending_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(DEFAULT_FRAME_MS),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            pending_capacity: DEFAULT_PENDING_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidConfig`] for a zero frame interval or a
    /// zero capacity. Zero throttle and debounce are allowed.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.frame_interval.is_zero() {
            return Err(BridgeError::InvalidConfig("frame interval must be > 0".into()));
        }
        if self.channel_capacity == 0 {
            return Err(BridgeError::InvalidConfig("channel capacity must be > 0".into()));
        }
        if self.pending_capacity == 0 {
            return Err(BridgeError::InvalidConfig("pending capacity must be > 0".into()));
        }
        Ok(())
    }
}
