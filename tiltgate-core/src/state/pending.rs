//! Debounce state

use crate::orientation::Pose;
use crate::traits::TimerToken;

/// An armed, cancellable pose confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingTransition {
    /// Pose that will be confirmed when the timer fires
    pub target: Pose,
    /// Time of the sample that started this transition (ms)
    pub scheduled_at_ms: u64,
    /// Time at which the transition is confirmed (ms)
    pub deadline_ms: u64,
    /// Timer handle used to cancel or match the firing
    pub token: TimerToken,
}

impl PendingTransition {
    /// Check if the deadline has been reached at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Time left until confirmation, zero once due
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.deadline_ms.saturating_sub(now_ms)
    }
}

/// State owned by one `DebounceStateMachine`
///
/// Invariant: `pending.target != confirmed` whenever `pending` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceState {
    /// Last pose reported to the listener
    pub confirmed: Pose,
    /// In-flight confirmation, if any
    pub pending: Option<PendingTransition>,
}

impl DebounceState {
    /// Initial state: normal pose, nothing pending
    pub const fn new() -> Self {
        Self {
            confirmed: Pose::Normal,
            pending: None,
        }
    }

    /// Check if no confirmation is in flight
    pub fn is_settled(&self) -> bool {
        self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = DebounceState::new();
        assert_eq!(state.confirmed, Pose::Normal);
        assert!(state.is_settled());
        assert_eq!(state, DebounceState::default());
    }

    #[test]
    fn test_pending_deadline() {
        let pending = PendingTransition {
            target: Pose::Target,
            scheduled_at_ms: 100,
            deadline_ms: 600,
            token: TimerToken(1),
        };
        assert!(!pending.is_due(599));
        assert!(pending.is_due(600));
        assert_eq!(pending.remaining_ms(350), 250);
        assert_eq!(pending.remaining_ms(700), 0);
    }
}
