//! Orientation samples and pose classification
//!
//! A sample is classified on its own, with no memory of earlier samples.
//! Smoothing over time is the job of the state machine.

pub mod classifier;
pub mod sample;

pub use classifier::{classify, evaluate, Pose, PoseEvidence};
pub use sample::{OrientationSample, TimedSample};
