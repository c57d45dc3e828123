//! Detector status snapshot

use crate::orientation::{Pose, PoseEvidence, TimedSample};

/// Point-in-time view of a detector, for debug readouts
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorStatus {
    /// Detector is started
    pub running: bool,
    /// Last pose reported to the listener
    pub confirmed: Pose,
    /// Pose awaiting confirmation, if any
    pub pending_target: Option<Pose>,
    /// Deadline of the pending confirmation (ms)
    pub pending_deadline_ms: Option<u64>,
    /// Most recent sample processed since start
    pub last_sample: Option<TimedSample>,
    /// Classification predicates of `last_sample`
    pub evidence: Option<PoseEvidence>,
    /// Samples processed since start
    pub samples_seen: u32,
}

impl DetectorStatus {
    /// Time left until the pending confirmation, if any
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending_deadline_ms
            .map(|deadline| deadline.saturating_sub(now_ms))
    }
}
