//! Minimal TOML parser for the covering configuration
//!
//! Handles only the subset `cover.toml` uses:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), also after a value
//!
//! Unknown sections and keys are skipped so older firmware accepts newer
//! files. The full file is checked with the real `toml` crate at build
//! time.

use heapless::String;

use super::types::{CoverConfig, DefaultPosition, PinConfig, MAX_NAME_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed `[section]` header
    InvalidSection,
    /// Value of the wrong type or out of the type's range
    InvalidValue,
    /// Pin string not of the form `[!]gpioNN`
    InvalidPin,
    /// String longer than its field
    TooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Cover,
    Buttons,
    Link,
    Unknown,
}

/// Parse TOML configuration into a [`CoverConfig`]
///
/// Missing keys keep their defaults. The result is not validated; call
/// [`CoverConfig::validate`] on it.
pub fn parse_config(input: &str) -> Result<CoverConfig, ParseError> {
    let mut config = CoverConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            // A [buttons] table means the remote is wired unless it says
            // otherwise
            if section == Section::Buttons {
                config.buttons.enabled = true;
            }
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.split('#').next())
        .map(str::trim)
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    if inner.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    Ok(match inner {
        "cover" => Section::Cover,
        "buttons" => Section::Buttons,
        "link" => Section::Link,
        _ => Section::Unknown,
    })
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = strip_comment(value.trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Cut a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut CoverConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Cover, "name") => config.name = parse_name(value)?,
        (Section::Cover, "default_position") => {
            config.default_position = parse_default_position(value)?
        }
        (Section::Cover, "movement_duration") => config.movement_duration_s = parse_int(value)?,
        (Section::Cover, "button_press_duration") => config.button_press_ms = parse_int(value)?,

        (Section::Buttons, "enabled") => config.buttons.enabled = parse_bool(value)?,
        (Section::Buttons, "up") => config.buttons.up = parse_pin_string(value)?,
        (Section::Buttons, "down") => config.buttons.down = parse_pin_string(value)?,
        (Section::Buttons, "my_position") => config.buttons.my_position = parse_pin_string(value)?,

        (Section::Link, "baud") => config.link.baud = parse_int(value)?,

        _ => {}
    }
    Ok(())
}

fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_name(value: &str) -> Result<String<MAX_NAME_LEN>, ParseError> {
    let mut name = String::new();
    name.push_str(parse_string(value))
        .map_err(|_| ParseError::TooLong)?;
    Ok(name)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_default_position(value: &str) -> Result<DefaultPosition, ParseError> {
    match parse_string(value) {
        "up" => Ok(DefaultPosition::Up),
        "down" => Ok(DefaultPosition::Down),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like `"gpio12"` or `"!gpio12"` (active-low)
pub fn parse_pin_string(value: &str) -> Result<PinConfig, ParseError> {
    let s = parse_string(value.trim());
    let (inverted, s) = match s.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let digits = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin = digits.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig { pin, inverted })
}
