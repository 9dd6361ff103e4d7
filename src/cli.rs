use std::time::Duration;

use clap::Parser;

use crate::config::{
    BridgeConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_DEBOUNCE_MS, DEFAULT_FRAME_MS, DEFAULT_PENDING_CAPACITY,
    DEFAULT_THROTTLE_MS,
};

#[derive(Parser, Debug)]
#[command(
    name = "cellview",
    about = "Viewport engine host: JSON-lines commands on stdin, events on stdout"
)]
pub struct Cli {
    /// Render loop period in milliseconds.
    #[arg(long, env = "CELLVIEW_FRAME_MS", default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: u64,

    /// Minimum milliseconds between tooltip hit-tests.
    #[arg(long, env = "CELLVIEW_THROTTLE_MS", default_value_t = DEFAULT_THROTTLE_MS)]
    throttle_ms: u64,

    /// Quiet milliseconds before visible points are broadcast.
    #[arg(long, env = "CELLVIEW_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    #[arg(long, env = "CELLVIEW_CHANNEL_CAPACITY", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    channel_capacity: usize,

    /// Commands held before `init`; the oldest is dropped on overflow.
    #[arg(long, env = "CELLVIEW_PENDING_CAPACITY", default_value_t = DEFAULT_PENDING_CAPACITY)]
    pending_capacity: usize,
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> BridgeConfig {
        BridgeConfig {
            frame_interval: Duration::from_millis(self.frame_ms),
            throttle: Duration::from_millis(self.throttle_ms),
            debounce: Duration::from_millis(self.debounce_ms),
            channel_capacity: self.channel_capacity,
            pending_capacity: self.pending_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from(["cellview", "--frame-ms", "33", "--debounce-ms", "250", "--pending-capacity", "8"]);
        let config = cli.config();
        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert_eq!(config.throttle, Duration::from_millis(DEFAULT_THROTTLE_MS));
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.pending_capacity, 8);
    }

    #[test]
    fn non_numeric_flag_rejected() {
        assert!(Cli::try_parse_from(["cellview", "--frame-ms", "fast"]).is_err());
    }
}
