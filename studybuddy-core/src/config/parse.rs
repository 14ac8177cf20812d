//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `device.toml`. It does NOT support the full TOML grammar and never
//! allocates, so it runs on the target at boot.
//!
//! Supported features:
//! - Key = value pairs (pin string, colour string, integer, float)
//! - [section] headers
//! - Comments (# ...), including trailing comments after a value
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys and nested sections

use super::pins::parse_pin_string;
use super::types::{ConfigError, DeviceConfig, PinConfig};
use crate::face::color565;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in the current section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Parsed values violate a configuration invariant
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Face,
    Pins,
    Display,
}

/// Parse TOML configuration into DeviceConfig
///
/// Keys that are not present keep their default value. The result is
/// validated before it is returned.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `# comment` that is not inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse section header like "sensor" or "display"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensor" => Ok(Section::Sensor),
        "face" => Ok(Section::Face),
        "pins" => Ok(Section::Pins),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer value (underscores allowed, as in TOML)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits = [0u8; 24];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        if len == digits.len() {
            return Err(ParseError::InvalidValue);
        }
        digits[len] = b;
        len += 1;
    }
    core::str::from_utf8(&digits[..len])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(ParseError::InvalidValue)
}

/// Parse a float value; integers are accepted as floats
fn parse_float(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a colour like `"#FFCD00"` into RGB565
fn parse_color(value: &str) -> Result<u16, ParseError> {
    let hex = parse_string(value)?
        .strip_prefix('#')
        .ok_or(ParseError::InvalidValue)?;
    if hex.len() != 6 {
        return Err(ParseError::InvalidValue);
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidValue)?;
    Ok(color565((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

/// Parse a pin value like `"gpio3"` or `"^gpio3"`
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let value = parse_string(value).unwrap_or(value);
    let (pin, pull_up) = parse_pin_string(value).ok_or(ParseError::InvalidPin)?;
    Ok(PinConfig { pin, pull_up })
}

/// Parse an optional pin value; `"none"` disables the function
fn parse_optional_pin(value: &str) -> Result<Option<PinConfig>, ParseError> {
    if parse_string(value).unwrap_or(value) == "none" {
        return Ok(None);
    }
    parse_pin(value).map(Some)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "poll_interval_ms" => config.poll_interval_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sensor => {
            let sensor = &mut config.sensor;
            match key {
                "threshold_cm" => sensor.threshold_cm = parse_float(value)?,
                "settle_us" => sensor.settle_us = parse_int(value)?,
                "trigger_pulse_us" => sensor.trigger_pulse_us = parse_int(value)?,
                "echo_timeout_us" => sensor.echo_timeout_us = parse_int(value)?,
                "sample_interval_ms" => sensor.sample_interval_ms = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Face => {
            let face = &mut config.face;
            match key {
                "center_x" => face.center_x = parse_int(value)?,
                "center_y" => face.center_y = parse_int(value)?,
                "radius" => face.radius = parse_int(value)?,
                "caption_x" => face.caption_x = parse_int(value)?,
                "caption_y" => face.caption_y = parse_int(value)?,
                "text_size" => face.text_size = parse_int(value)?,
                "background_color" => face.background_color = parse_color(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Pins => match key {
            "trigger_pin" => config.trigger_pin = parse_pin(value)?,
            "echo_pin" => config.echo_pin = parse_pin(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Display => {
            let display = &mut config.display;
            match key {
                "dc_pin" => display.dc_pin = parse_pin(value)?,
                "cs_pin" => display.cs_pin = parse_pin(value)?,
                "rst_pin" => display.rst_pin = parse_pin(value)?,
                "backlight_pin" => display.backlight_pin = parse_optional_pin(value)?,
                "spi_hz" => display.spi_hz = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
    }

    Ok(())
}
