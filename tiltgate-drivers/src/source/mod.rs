//! Sample source implementations

pub mod queue;
pub mod replay;

pub use queue::QueuedSource;
pub use replay::ReplaySource;
