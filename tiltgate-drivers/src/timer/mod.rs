//! Timer implementations

pub mod manual;

pub use manual::{ManualTimer, MAX_ARMED_TIMERS};
