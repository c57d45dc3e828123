//! Bounded push queue
//!
//! Platform orientation callbacks push samples here as they arrive; the
//! detector drains them on its next service pass. When the consumer falls
//! behind, the oldest sample is dropped so the freshest reading always
//! gets through.

use heapless::Deque;
use tiltgate_core::orientation::{OrientationSample, TimedSample};
use tiltgate_core::traits::{SampleSink, SampleSource};

/// Fixed-capacity sample queue
pub struct QueuedSource<const N: usize> {
    queue: Deque<TimedSample, N>,
    active: bool,
    overruns: u32,
}

impl<const N: usize> Default for QueuedSource<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> QueuedSource<N> {
    /// Create an inactive, empty queue
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            active: false,
            overruns: 0,
        }
    }

    /// Push a sample taken at `now_ms`
    ///
    /// Returns `false` if the source is stopped and the sample was discarded.
    pub fn push(&mut self, sample: OrientationSample, now_ms: u64) -> bool {
        if !self.active {
            return false;
        }

        if self.queue.is_full() {
            self.queue.pop_front();
            self.overruns = self.overruns.saturating_add(1);

            #[cfg(feature = "defmt")]
            defmt::warn!("Sample queue overrun ({} total)", self.overruns);
        }

        // Capacity was just ensured
        let _ = self.queue.push_back(TimedSample::new(now_ms, sample));
        true
    }

    /// Samples waiting for delivery
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is waiting for delivery
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Samples dropped because the queue was full
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}

impl<const N: usize> SampleSource for QueuedSource<N> {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
        self.queue.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn deliver<K: SampleSink>(&mut self, sink: &mut K) -> usize {
        let mut delivered = 0;
        while let Some(timed) = self.queue.pop_front() {
            sink.push_sample(timed.sample, timed.at_ms);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect {
        times: Vec<u64>,
    }

    impl SampleSink for Collect {
        fn push_sample(&mut self, _sample: OrientationSample, now_ms: u64) {
            self.times.push(now_ms);
        }
    }

    #[test]
    fn test_inactive_discards() {
        let mut source: QueuedSource<4> = QueuedSource::new();
        assert!(!source.push(OrientationSample::unknown(), 0));
        assert!(source.is_empty());
    }

    #[test]
    fn test_delivers_in_order() {
        let mut source: QueuedSource<4> = QueuedSource::new();
        source.start();
        source.push(OrientationSample::unknown(), 10);
        source.push(OrientationSample::unknown(), 20);

        let mut sink = Collect::default();
        assert_eq!(source.deliver(&mut sink), 2);
        assert_eq!(sink.times, vec![10, 20]);
        assert!(source.is_empty());
    }

    #[test]
    fn test_overrun_drops_oldest() {
        let mut source: QueuedSource<2> = QueuedSource::new();
        source.start();
        for t in [10, 20, 30] {
            assert!(source.push(OrientationSample::unknown(), t));
        }
        assert_eq!(source.overruns(), 1);

        let mut sink = Collect::default();
        source.deliver(&mut sink);
        assert_eq!(sink.times, vec![20, 30]);
    }

    #[test]
    fn test_stop_clears_pending_samples() {
        let mut source: QueuedSource<4> = QueuedSource::new();
        source.start();
        source.push(OrientationSample::unknown(), 10);
        source.stop();

        assert!(!source.is_active());
        assert_eq!(source.len(), 0);
        let mut sink = Collect::default();
        assert_eq!(source.deliver(&mut sink), 0);
    }

    #[test]
    fn test_feeds_state_machine_directly() {
        use crate::timer::ManualTimer;
        use tiltgate_core::config::PoseConfig;
        use tiltgate_core::orientation::Pose;
        use tiltgate_core::traits::FnListener;
        use tiltgate_core::DebounceStateMachine;

        let mut confirmed = 0;
        {
            let mut machine = DebounceStateMachine::new(
                PoseConfig::default(),
                ManualTimer::new(),
                FnListener::new(|| confirmed += 1, || {}),
            );
            let mut source: QueuedSource<8> = QueuedSource::new();
            source.start();

            let landscape = OrientationSample::from_degrees(10.0, 5.0, 85.0);
            for t in (0..=500).step_by(100) {
                source.push(landscape, t);
            }

            assert_eq!(source.deliver(&mut machine), 6);
            assert_eq!(machine.confirmed_pose(), Pose::Target);
        }
        assert_eq!(confirmed, 1);
    }
}
