//! Orientation sample types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One instantaneous orientation reading
///
/// Each axis is `None` when the sensor did not report it. Unknown axes are
/// kept distinct from zero all the way through classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationSample {
    /// Rotation around the vertical axis, degrees in [0, 360)
    pub alpha: Option<f32>,
    /// Front-back tilt, degrees in [-180, 180]
    pub beta: Option<f32>,
    /// Left-right tilt, degrees in [-90, 90]
    pub gamma: Option<f32>,
}

impl OrientationSample {
    /// Create a sample from optional axis readings
    ///
    /// Non-finite readings (NaN, infinity) are stored as unknown.
    pub fn new(alpha: Option<f32>, beta: Option<f32>, gamma: Option<f32>) -> Self {
        Self {
            alpha: alpha.filter(|v| v.is_finite()),
            beta: beta.filter(|v| v.is_finite()),
            gamma: gamma.filter(|v| v.is_finite()),
        }
    }

    /// Create a sample with all three axes reported
    pub fn from_degrees(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self::new(Some(alpha), Some(beta), Some(gamma))
    }

    /// A sample from a sensor that reported nothing
    pub const fn unknown() -> Self {
        Self {
            alpha: None,
            beta: None,
            gamma: None,
        }
    }

    /// Check if every axis was reported
    pub fn is_complete(&self) -> bool {
        self.alpha.is_some() && self.beta.is_some() && self.gamma.is_some()
    }
}

/// A sample paired with the time it was taken
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimedSample {
    /// Milliseconds on the detector's monotonic clock
    pub at_ms: u64,
    /// Reading taken at `at_ms`
    pub sample: OrientationSample,
}

impl TimedSample {
    /// Pair a sample with its timestamp
    pub const fn new(at_ms: u64, sample: OrientationSample) -> Self {
        Self { at_ms, sample }
    }
}
