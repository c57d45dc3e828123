//! Pose classifier
//!
//! Maps a single sample to a pose. The target pose is a device held in
//! landscape framing (strong left-right tilt) while lying near flat
//! front-to-back, with the sensor reporting a real heading.

use super::sample::OrientationSample;
use crate::config::PoseConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical device pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pose {
    /// Anything other than the target stance
    #[default]
    Normal,
    /// Device held in the target stance
    Target,
}

impl Pose {
    /// Check if this is the target pose
    pub fn is_target(&self) -> bool {
        matches!(self, Pose::Target)
    }
}

/// The three predicates a classification is built from
///
/// Kept separately so a debug readout can show which condition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PoseEvidence {
    /// Gamma known and |gamma| above the gamma threshold
    pub landscape: bool,
    /// Beta known and |beta| below the beta threshold
    pub near_horizontal: bool,
    /// Alpha known; its value is never constrained
    pub heading_known: bool,
}

impl PoseEvidence {
    /// Target only when every predicate holds
    pub fn pose(&self) -> Pose {
        if self.landscape && self.near_horizontal && self.heading_known {
            Pose::Target
        } else {
            Pose::Normal
        }
    }
}

/// Evaluate each classification predicate for a sample
pub fn evaluate(sample: &OrientationSample, config: &PoseConfig) -> PoseEvidence {
    PoseEvidence {
        landscape: sample
            .gamma
            .is_some_and(|gamma| abs(gamma) > config.gamma_threshold_deg),
        near_horizontal: sample
            .beta
            .is_some_and(|beta| abs(beta) < config.beta_threshold_deg),
        heading_known: sample.alpha.is_some(),
    }
}

/// Classify a sample
///
/// Total and side-effect free. A missing axis makes its predicate false,
/// so an incomplete sample is always `Normal`.
pub fn classify(sample: &OrientationSample, config: &PoseConfig) -> Pose {
    evaluate(sample, config).pose()
}

// f32::abs is not available in core on older toolchains
fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}
