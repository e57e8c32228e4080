//! Build script for velum-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates cover.toml at compile time

use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate cover.toml at compile time
///
/// The firmware parses the same file with its own small parser and falls
/// back to defaults on error, so mistakes are caught here instead of at
/// boot.
fn validate_config() {
    println!("cargo:rerun-if-changed=cover.toml");

    let config_path = Path::new("cover.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: cover.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a cover.toml configuration file.            ║\n\
            ║  Please create one in the velum-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read cover.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in cover.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_cover(&config, &mut errors);
    validate_buttons(&config, &mut errors);
    validate_link(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid settings in cover.toml                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=cover.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_int(
    table: &toml::Table,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(v)) => {
            errors.push(format!("{} = {} (must be {}-{})", key, v, min, max))
        }
        Some(_) => errors.push(format!("{} must be an integer", key)),
    }
}

/// Validate the [cover] section
fn validate_cover(config: &toml::Value, errors: &mut Vec<String>) {
    let cover = match config.get("cover") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[cover] must be a table".to_string());
            return;
        }
        None => return,
    };

    match cover.get("name") {
        None => {}
        Some(toml::Value::String(name)) if name.len() > 32 => {
            errors.push(format!("cover name is {} bytes (max 32)", name.len()))
        }
        Some(toml::Value::String(_)) => {}
        Some(_) => errors.push("cover name must be a string".to_string()),
    }

    match cover.get("default_position").map(|v| v.as_str()) {
        None | Some(Some("up")) | Some(Some("down")) => {}
        Some(_) => errors.push("default_position must be \"up\" or \"down\"".to_string()),
    }

    check_int(cover, "movement_duration", 1, 600, errors);
    check_int(cover, "button_press_duration", 50, 5000, errors);
}

/// Validate the [buttons] section: pin syntax and distinct pins
fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let buttons = match config.get("buttons") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[buttons] must be a table".to_string());
            return;
        }
        None => return,
    };

    if let Some(enabled) = buttons.get("enabled") {
        if !enabled.is_bool() {
            errors.push("buttons.enabled must be true or false".to_string());
        }
    }

    let mut seen: HashMap<u8, &str> = HashMap::new();
    for key in ["up", "down", "my_position"] {
        let Some(value) = buttons.get(key) else {
            continue;
        };
        let Some(pin) = value.as_str().and_then(parse_pin) else {
            errors.push(format!("buttons.{} must look like \"gpioN\" or \"!gpioN\"", key));
            continue;
        };
        if pin <= 1 || pin >= 30 {
            errors.push(format!("buttons.{} uses gpio{} (valid: 2-29)", key, pin));
        }
        if let Some(other) = seen.insert(pin, key) {
            errors.push(format!("buttons.{} and buttons.{} share gpio{}", other, key, pin));
        }
    }
}

fn parse_pin(s: &str) -> Option<u8> {
    s.trim_start_matches('!').strip_prefix("gpio")?.parse().ok()
}

/// Validate the [link] section
fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(toml::Value::Table(link)) = config.get("link") {
        check_int(link, "baud", 1200, 921_600, errors);
    }
}
