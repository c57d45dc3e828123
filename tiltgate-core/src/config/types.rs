//! Configuration type definitions
//!
//! A `PoseConfig` is created once, validated, and then handed to the state
//! machine, which keeps its own copy for the lifetime of the detector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum |gamma| for landscape framing (degrees)
pub const DEFAULT_GAMMA_THRESHOLD_DEG: f32 = 70.0;

/// Default maximum |beta| for a near-horizontal device (degrees)
pub const DEFAULT_BETA_THRESHOLD_DEG: f32 = 20.0;

/// Default dwell time before a pose change is confirmed
pub const DEFAULT_STABILITY_TIME_MS: u32 = 500;

/// Largest accepted dwell time
pub const MAX_STABILITY_TIME_MS: u32 = 60_000;

/// Gamma is reported in [-90, 90]
pub const MAX_GAMMA_THRESHOLD_DEG: f32 = 90.0;

/// Beta is reported in [-180, 180]
pub const MAX_BETA_THRESHOLD_DEG: f32 = 180.0;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gamma threshold is NaN, negative or above 90°
    InvalidGammaThreshold,
    /// Beta threshold is NaN, negative or above 180°
    InvalidBetaThreshold,
    /// Stability time exceeds `MAX_STABILITY_TIME_MS`
    InvalidStabilityTime,
}

/// Pose detection configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseConfig {
    /// Minimum |gamma| to count as landscape framing (degrees, exclusive)
    pub gamma_threshold_deg: f32,
    /// Maximum |beta| to count as near-horizontal (degrees, exclusive)
    pub beta_threshold_deg: f32,
    /// Continuous dwell before a pose change is confirmed (ms)
    pub stability_time_ms: u32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            gamma_threshold_deg: DEFAULT_GAMMA_THRESHOLD_DEG,
            beta_threshold_deg: DEFAULT_BETA_THRESHOLD_DEG,
            stability_time_ms: DEFAULT_STABILITY_TIME_MS,
        }
    }
}

impl PoseConfig {
    /// Create a validated configuration
    pub fn new(
        gamma_threshold_deg: f32,
        beta_threshold_deg: f32,
        stability_time_ms: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            gamma_threshold_deg,
            beta_threshold_deg,
            stability_time_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !in_range(self.gamma_threshold_deg, MAX_GAMMA_THRESHOLD_DEG) {
            return Err(ConfigError::InvalidGammaThreshold);
        }

        if !in_range(self.beta_threshold_deg, MAX_BETA_THRESHOLD_DEG) {
            return Err(ConfigError::InvalidBetaThreshold);
        }

        if self.stability_time_ms > MAX_STABILITY_TIME_MS {
            return Err(ConfigError::InvalidStabilityTime);
        }

        Ok(())
    }

    /// Check if this configuration is valid
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// NaN fails both comparisons
fn in_range(value: f32, max: f32) -> bool {
    value >= 0.0 && value <= max
}
