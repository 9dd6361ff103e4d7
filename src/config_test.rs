use super::*;

#[test]
fn defaults_are_valid() {
    let config = BridgeConfig::default();
    assert_eq!(config.frame_interval, Duration::from_millis(16));
    assert_eq!(config.throttle, Duration::from_millis(16));
    assert_eq!(config.debounce, Duration::from_millis(100));
    assert!(config.validate().is_ok());
}

#[test]
fn zero_frame_interval_rejected() {
    let config = BridgeConfig { frame_interval: Duration::ZERO, ..BridgeConfig::default() };
    assert!(matches!(config.validate(), Err(BridgeError::InvalidConfig(_))));
}

#[test]
fn zero_capacities_rejected() {
    let channel = BridgeConfig { channel_capacity: 0, ..BridgeConfig::default() };
    let pending = BridgeConfig { pending_capacity: 0, ..BridgeConfig::default() };
    assert!(channel.validate().is_err());
    assert!(pending.validate().is_err());
}

#[test]
fn zero_throttle_and_debounce_allowed() {
    let config = BridgeConfig { throttle: Duration::ZERO, debounce: Duration::ZERO, ..BridgeConfig::default() };
    assert!(config.validate().is_ok());
}
