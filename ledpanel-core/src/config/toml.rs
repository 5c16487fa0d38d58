//! Simple TOML parser for panel configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the panel configuration. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - [section] headers
//! - key = integer (decimal with `_` separators, or `0x` hex)
//! - Comments (# ...), full line or trailing
//!
//! Unknown sections and keys are rejected so typos do not silently fall
//! back to defaults.

use super::types::PanelConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Value is not an integer, or line is not `key = value`
    InvalidValue,
    /// Key not known in the current section
    UnknownKey,
    /// Value outside the allowed range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Strip,
    Latch,
}

/// Parse TOML configuration into PanelConfig
pub fn parse_config(input: &str) -> Result<PanelConfig, ConfigError> {
    let mut config = PanelConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let value = parse_integer(value.trim())?;
        apply_key(&mut config, section, key.trim(), value)?;
    }

    validate(&config)?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_section_header(name: &str) -> Result<Section, ConfigError> {
    match name {
        "serial" => Ok(Section::Serial),
        "strip" => Ok(Section::Strip),
        "latch" => Ok(Section::Latch),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Parse a non-negative integer
fn parse_integer(value: &str) -> Result<u32, ConfigError> {
    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() || digits.starts_with('_') {
        return Err(ConfigError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ConfigError::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ConfigError::OutOfRange)?;
    }

    Ok(result)
}

fn apply_key(
    config: &mut PanelConfig,
    section: Section,
    key: &str,
    value: u32,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Serial, "baudrate") => config.serial.baudrate = value,
        (Section::Strip, "max_pixels") => {
            config.strip.max_pixels = u16::try_from(value).map_err(|_| ConfigError::OutOfRange)?
        }
        (Section::Strip, "spi_frequency_hz") => config.strip.spi_frequency_hz = value,
        (Section::Latch, "timeout_ms") => config.latch.timeout_ms = value,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn validate(config: &PanelConfig) -> Result<(), ConfigError> {
    if config.serial.baudrate == 0 || config.strip.spi_frequency_hz == 0 {
        return Err(ConfigError::OutOfRange);
    }
    if config.strip.max_pixels == 0 {
        return Err(ConfigError::OutOfRange);
    }
    Ok(())
}
