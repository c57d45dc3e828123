//! Debounce state machine
//!
//! Turns a per-sample classification stream into dwell-confirmed pose
//! changes. The state machine is explicit, owned and deterministic.

pub mod machine;
pub mod pending;

pub use machine::DebounceStateMachine;
pub use pending::{DebounceState, PendingTransition};
