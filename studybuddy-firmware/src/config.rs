//! Configuration loading
//!
//! `device.toml` is compiled into the image and parsed once at boot.

use defmt::*;
use studybuddy_core::config::{parse_config, DeviceConfig};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: threshold={} cm, trigger=gpio{}, echo=gpio{}, poll={} ms",
                config.sensor.threshold_cm,
                config.trigger_pin.pin,
                config.echo_pin.pin,
                config.poll_interval_ms
            );
            config
        }
        Err(e) => {
            warn!("device.toml rejected ({}), using defaults", e);
            DeviceConfig::default()
        }
    }
}
