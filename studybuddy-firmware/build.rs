//! Build script for studybuddy-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time, first key by key for readable
//!   messages, then merged with the defaults through the boot-time parser

use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use studybuddy_core::config::{parse_config, GPIO_COUNT, LCD_SPI_PINS};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    // Re-run if device.toml changes
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a device.toml configuration file.           ║\n\
            ║  Please create one in the studybuddy-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
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
    validate_required_sections(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_face(&config, &mut errors);
    validate_pins(&config, &mut errors);

    // Anything that slips past the key checks (e.g. a clash with a
    // default pin) would make the firmware fall back to defaults at boot
    if errors.is_empty() {
        if let Err(e) = parse_config(&config_content) {
            errors.push(format!("rejected by the firmware parser: {:?}", e));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml validation failed                            ║\n\
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

    println!("cargo:warning=device.toml validated successfully");
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

/// The sensor and its wiring must be described
fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["sensor", "pins"] {
        if config.get(section).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
}

/// Read a number that may be written as an integer or a float
fn as_number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sensor) = config.get("sensor") else {
        return;
    };

    if let Some(threshold) = sensor.get("threshold_cm") {
        match as_number(threshold) {
            Some(t) if t.is_finite() && t > 0.0 => {}
            _ => errors.push("[sensor] threshold_cm must be a positive number".into()),
        }
    }

    let minimums = [("settle_us", 2), ("trigger_pulse_us", 10), ("echo_timeout_us", 1)];
    for (key, min) in minimums {
        if let Some(value) = sensor.get(key) {
            match value.as_integer() {
                Some(v) if v >= min => {}
                _ => errors.push(format!("[sensor] {} must be an integer >= {}", key, min)),
            }
        }
    }
}

fn validate_face(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(face) = config.get("face") else {
        return;
    };

    if let Some(radius) = face.get("radius") {
        match radius.as_integer() {
            Some(r) if r >= 10 => {}
            _ => errors.push("[face] radius must be an integer >= 10".into()),
        }
    }

    if let Some(color) = face.get("background_color") {
        let valid = color
            .as_str()
            .and_then(|s| s.strip_prefix('#'))
            .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .unwrap_or(false);
        if !valid {
            errors.push("[face] background_color must look like \"#RRGGBB\"".into());
        }
    }
}

/// Parse "gpioN" or "^gpioN"
fn parse_pin(value: &str) -> Option<u8> {
    value
        .trim_start_matches('^')
        .strip_prefix("gpio")?
        .parse()
        .ok()
        .filter(|&pin| (pin as usize) < GPIO_COUNT)
}

/// Every pin must be a valid, unreserved GPIO used only once
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let mut used: HashMap<u8, String> = HashMap::new();

    for section in ["pins", "display"] {
        let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
            continue;
        };

        for (key, value) in table {
            if !key.ends_with("_pin") {
                continue;
            }
            let name = format!("{}.{}", section, key);
            let Some(text) = value.as_str() else {
                errors.push(format!("{} must be a pin string like \"gpio3\"", name));
                continue;
            };
            if key == "backlight_pin" && text == "none" {
                continue;
            }
            let Some(pin) = parse_pin(text) else {
                errors.push(format!("{}: invalid pin '{}'", name, text));
                continue;
            };
            if LCD_SPI_PINS.contains(&pin) {
                errors.push(format!("{}: gpio{} is wired to the LCD SPI bus", name, pin));
                continue;
            }
            if let Some(other) = used.get(&pin) {
                errors.push(format!("{}: gpio{} already used by {}", name, pin, other));
                continue;
            }
            used.insert(pin, name);
        }
    }
}
