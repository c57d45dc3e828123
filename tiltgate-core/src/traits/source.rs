//! Push-style sample source

use crate::orientation::OrientationSample;

/// Consumer side of a sample source
pub trait SampleSink {
    /// Accept one sample taken at `now_ms`
    fn push_sample(&mut self, sample: OrientationSample, now_ms: u64);
}

/// Producer of orientation samples
///
/// Platform subscription, permission handling and sensor failures are all
/// the source's concern. A source that cannot get sensor access simply
/// delivers nothing.
pub trait SampleSource {
    /// Begin accepting samples from the platform
    fn start(&mut self);

    /// Stop accepting samples; anything not yet delivered is dropped
    fn stop(&mut self);

    /// Check if the source is currently accepting samples
    fn is_active(&self) -> bool;

    /// Push every sample that is ready into `sink`, oldest first
    ///
    /// Returns the number of samples delivered.
    fn deliver<K: SampleSink>(&mut self, sink: &mut K) -> usize;
}
