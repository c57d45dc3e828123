//! Board-agnostic core logic for pose detection
//!
//! This crate contains all detection logic that does not depend on a
//! specific sensor, platform event source or timer implementation:
//!
//! - Configuration types, TOML parsing and stored config encoding
//! - Orientation samples and the pose classifier
//! - Debounce state machine for dwell-confirmed pose changes
//! - Capability traits (timer, clock, sample source, listener)
//! - Detector wiring a sample source into the state machine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod detector;
pub mod orientation;
pub mod state;
pub mod traits;

pub use config::PoseConfig;
pub use detector::{DetectorStatus, PoseDetector};
pub use orientation::{classify, OrientationSample, Pose};
pub use state::DebounceStateMachine;
