//! Simple TOML parser for pose configuration
//!
//! This is a minimal line-oriented parser that handles only the subset
//! needed for tiltgate configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[pose]` section header
//! - Key = value pairs (integer or float)
//! - Comments (# ...) on their own line or after a value
//!
//! Keys left out of the file keep their default values. The parsed
//! configuration is validated before it is returned.
//!
//! ```toml
//! [pose]
//! gamma_threshold = 70      # degrees
//! beta_threshold = 20       # degrees
//! stability_time_ms = 500
//! ```

use super::types::{ConfigError, PoseConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header, a comment nor `key = value`
    InvalidLine,
    /// Key is not recognised in the current section
    UnknownKey,
    /// Value could not be parsed as the expected type
    InvalidValue,
    /// Values parsed but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Pose,
}

/// Parse TOML configuration into a validated `PoseConfig`
pub fn parse_config(input: &str) -> Result<PoseConfig, ParseError> {
    let mut config = PoseConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate().map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("Rejected pose config: {:?}", e);
        ParseError::from(e)
    })?;

    Ok(config)
}

/// Parse section header like "pose"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "pose" => Ok(Section::Pose),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop everything after a `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash_pos) => &line[..hash_pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a number of degrees
fn parse_degrees(value: &str) -> Result<f32, ParseError> {
    let degrees: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(ParseError::InvalidValue)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PoseConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Pose, "gamma_threshold") => config.gamma_threshold_deg = parse_degrees(value)?,
        (Section::Pose, "beta_threshold") => config.beta_threshold_deg = parse_degrees(value)?,
        (Section::Pose, "stability_time_ms") => config.stability_time_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}
