//! Configuration loading
//!
//! Parses the embedded `cover.toml`. A file that fails to parse or
//! validate falls back to the built-in defaults, so the covering still
//! answers the host (with simulated buttons) instead of halting at boot.

use defmt::*;

use velum_core::config::{parse_config, CoverConfig};

/// Embedded configuration (compiled into firmware)
/// Edit cover.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../../cover.toml");

/// Load the covering configuration
pub fn load() -> CoverConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse cover.toml: {:?}, using defaults", e);
            return CoverConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("Invalid cover.toml: {:?}, using defaults", e);
        return CoverConfig::default();
    }

    info!(
        "Loaded configuration for \"{}\" ({}s traverse, {}ms press)",
        config.name.as_str(),
        config.movement_duration_s,
        config.button_press_ms
    );
    config
}
