//! Capability traits
//!
//! These traits define the interface between the detection logic and the
//! platform: where samples come from, how time is measured and how deferred
//! confirmations are scheduled, and who is told about pose changes.

pub mod listener;
pub mod source;
pub mod timer;

pub use listener::{FnListener, PoseListener};
pub use source::{SampleSink, SampleSource};
pub use timer::{Clock, TimerToken, TransitionTimer};
