//! Configuration type definitions
//!
//! These types describe one covering: its name, timing, initial position,
//! the GPIO lines wired to the remote's buttons and the host link. They are
//! filled from the embedded `cover.toml` by [`super::parse_config`].

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::{MotionConfig, Position};

/// Maximum covering name length
pub const MAX_NAME_LEN: usize = 32;

/// Accepted full-traverse times (s)
pub const MOVEMENT_DURATION_RANGE: core::ops::RangeInclusive<u16> = 1..=600;

/// Accepted button press lengths (ms)
pub const BUTTON_PRESS_RANGE: core::ops::RangeInclusive<u32> = 50..=5_000;

/// Position assumed at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DefaultPosition {
    /// Fully open (100%)
    Up,
    /// Fully closed (0%)
    #[default]
    Down,
}

impl DefaultPosition {
    pub const fn position(self) -> Position {
        match self {
            DefaultPosition::Up => Position::OPEN,
            DefaultPosition::Down => Position::CLOSED,
        }
    }
}

/// GPIO pin with polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low
    pub inverted: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Active-low pin (how the remote's buttons are normally wired)
    pub const fn active_low(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Button wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonsConfig {
    /// `false` runs without hardware: every press is simulated
    pub enabled: bool,
    pub up: PinConfig,
    pub down: PinConfig,
    pub my_position: PinConfig,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            up: PinConfig::active_low(2),
            down: PinConfig::active_low(3),
            my_position: PinConfig::active_low(4),
        }
    }
}

/// Host link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    pub baud: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { baud: 115_200 }
    }
}

/// Complete covering configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverConfig {
    /// Display name
    pub name: String<MAX_NAME_LEN>,
    /// Position assumed at boot
    pub default_position: DefaultPosition,
    /// Full-traverse time (s)
    pub movement_duration_s: u16,
    /// Button hold time (ms)
    pub button_press_ms: u32,
    pub buttons: ButtonsConfig,
    pub link: LinkConfig,
}

impl Default for CoverConfig {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str("Somfy Shutter");
        Self {
            name,
            default_position: DefaultPosition::Down,
            movement_duration_s: 8,
            button_press_ms: 500,
            buttons: ButtonsConfig::default(),
            link: LinkConfig::default(),
        }
    }
}

/// Configuration rejected by [`CoverConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Full-traverse time outside 1..=600 s
    MovementDuration(u16),
    /// Press length outside 50..=5000 ms
    ButtonPress(u32),
    /// Two buttons share one GPIO
    DuplicatePin(u8),
    /// Baud rate of zero
    Baud,
}

impl CoverConfig {
    /// Check ranges and pin assignments
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MOVEMENT_DURATION_RANGE.contains(&self.movement_duration_s) {
            return Err(ConfigError::MovementDuration(self.movement_duration_s));
        }
        if !BUTTON_PRESS_RANGE.contains(&self.button_press_ms) {
            return Err(ConfigError::ButtonPress(self.button_press_ms));
        }

        let b = &self.buttons;
        if b.up.pin == b.down.pin || b.up.pin == b.my_position.pin {
            return Err(ConfigError::DuplicatePin(b.up.pin));
        }
        if b.down.pin == b.my_position.pin {
            return Err(ConfigError::DuplicatePin(b.down.pin));
        }

        if self.link.baud == 0 {
            return Err(ConfigError::Baud);
        }
        Ok(())
    }

    /// Timing handed to the motion controller
    pub fn motion(&self) -> MotionConfig {
        MotionConfig::from_movement_duration(
            self.movement_duration_s,
            self.button_press_ms,
            self.default_position.position(),
        )
    }
}
