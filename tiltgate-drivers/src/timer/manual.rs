//! Manually advanced timer
//!
//! A simulated monotonic clock plus a fixed-size table of armed deadlines.
//! Time only moves when the owner calls `advance_by` or `advance_to`, which
//! makes detector behaviour fully deterministic in tests and replays.

use heapless::Vec;
use tiltgate_core::traits::{Clock, TimerToken, TransitionTimer};

/// Armed timer capacity
pub const MAX_ARMED_TIMERS: usize = 4;

/// One armed deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    token: TimerToken,
    deadline_ms: u64,
}

/// Simulated clock and single-shot timer table
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ms: u64,
    next_id: u32,
    armed: Vec<Armed, MAX_ARMED_TIMERS>,
}

impl ManualTimer {
    /// Create a timer at time zero with nothing armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer starting at `now_ms`
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    /// Move the clock forward
    pub fn advance_by(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }

    /// Move the clock to `now_ms`; the clock never goes backwards
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Number of armed timers
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Earliest armed deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.armed.iter().map(|a| a.deadline_ms).min()
    }
}

impl Clock for ManualTimer {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl TransitionTimer for ManualTimer {
    fn schedule(&mut self, deadline_ms: u64) -> TimerToken {
        self.next_id = self.next_id.wrapping_add(1);
        let token = TimerToken(self.next_id);

        if self.armed.is_full() {
            // Evict the oldest entry; a single state machine never gets here
            #[cfg(feature = "defmt")]
            defmt::warn!("Timer table full, dropping token {}", self.armed[0].token.0);
            self.armed.remove(0);
        }

        // Capacity was just ensured
        let _ = self.armed.push(Armed { token, deadline_ms });
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.armed.retain(|a| a.token != token);
    }

    fn poll_expired(&mut self) -> Option<TimerToken> {
        let now = self.now_ms;
        let (index, _) = self
            .armed
            .iter()
            .enumerate()
            .filter(|(_, a)| a.deadline_ms <= now)
            .min_by_key(|(_, a)| a.deadline_ms)?;

        Some(self.armed.remove(index).token)
    }
}
