//! Recorded trace replay
//!
//! Plays back a timestamped sample trace against a simulated clock. Each
//! sample becomes available once the replay horizon reaches its timestamp.

use tiltgate_core::orientation::TimedSample;
use tiltgate_core::traits::{SampleSink, SampleSource};

/// Replays a recorded trace in timestamp order
pub struct ReplaySource<'a> {
    trace: &'a [TimedSample],
    cursor: usize,
    horizon_ms: u64,
    active: bool,
}

impl<'a> ReplaySource<'a> {
    /// Create an inactive replay over `trace`
    ///
    /// The trace must be sorted by `at_ms`.
    pub fn new(trace: &'a [TimedSample]) -> Self {
        Self {
            trace,
            cursor: 0,
            horizon_ms: 0,
            active: false,
        }
    }

    /// Release every sample taken at or before `now_ms`
    ///
    /// Samples that come due while the replay is stopped are skipped.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.horizon_ms = self.horizon_ms.max(now_ms);
        if !self.active {
            self.skip_due();
        }
    }

    /// Samples not yet delivered or skipped
    pub fn remaining(&self) -> usize {
        self.trace.len() - self.cursor
    }

    /// Check if the whole trace has been consumed
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.trace.len()
    }

    fn skip_due(&mut self) {
        while self
            .trace
            .get(self.cursor)
            .is_some_and(|timed| timed.at_ms <= self.horizon_ms)
        {
            self.cursor += 1;
        }
    }
}

impl SampleSource for ReplaySource<'_> {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
        self.skip_due();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deliver<K: SampleSink>(&mut self, sink: &mut K) -> usize {
        if !self.active {
            return 0;
        }

        let mut delivered = 0;
        while let Some(timed) = self.trace.get(self.cursor) {
            if timed.at_ms > self.horizon_ms {
                break;
            }
            sink.push_sample(timed.sample, timed.at_ms);
            self.cursor += 1;
            delivered += 1;
        }
        delivered
    }
}
