//! Pose detector
//!
//! Wires a sample source into the debounce state machine and owns the
//! start/stop lifecycle. Debounce state is created fresh on start and
//! discarded on stop; stopping cancels any armed timer first so no
//! confirmation can fire after teardown.

pub mod status;

pub use status::DetectorStatus;

use crate::config::PoseConfig;
use crate::orientation::{OrientationSample, TimedSample};
use crate::state::DebounceStateMachine;
use crate::traits::{Clock, PoseListener, SampleSink, SampleSource, TransitionTimer};

/// Sample source, debounce state machine and lifecycle
pub struct PoseDetector<S, T, L> {
    source: S,
    machine: DebounceStateMachine<T, L>,
    running: bool,
    samples_seen: u32,
    last_sample: Option<TimedSample>,
}

/// Forwards delivered samples to the machine and records the latest one
struct Intake<'a, T, L> {
    machine: &'a mut DebounceStateMachine<T, L>,
    last_sample: &'a mut Option<TimedSample>,
    samples_seen: &'a mut u32,
}

impl<T: TransitionTimer, L: PoseListener> SampleSink for Intake<'_, T, L> {
    fn push_sample(&mut self, sample: OrientationSample, now_ms: u64) {
        self.machine.on_sample(&sample, now_ms);
        *self.last_sample = Some(TimedSample::new(now_ms, sample));
        *self.samples_seen = self.samples_seen.saturating_add(1);
    }
}

impl<S, T, L> PoseDetector<S, T, L>
where
    S: SampleSource,
    T: TransitionTimer,
    L: PoseListener,
{
    /// Create a stopped detector
    pub fn new(config: PoseConfig, source: S, timer: T, listener: L) -> Self {
        Self {
            source,
            machine: DebounceStateMachine::new(config, timer, listener),
            running: false,
            samples_seen: 0,
            last_sample: None,
        }
    }

    /// Start the source with fresh debounce state
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        self.machine.reset();
        self.samples_seen = 0;
        self.last_sample = None;
        self.source.start();
        self.running = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Pose detector started");
    }

    /// Stop the source and discard debounce state
    ///
    /// Any pending confirmation is cancelled; no listener method is called.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.source.stop();
        self.machine.reset();
        self.last_sample = None;
        self.running = false;

        #[cfg(feature = "defmt")]
        defmt::info!("Pose detector stopped after {} samples", self.samples_seen);
    }

    /// Check if the detector is started
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process delivered samples, then fire expired timers
    ///
    /// Returns the number of samples processed. Does nothing while stopped.
    pub fn service(&mut self) -> usize {
        if !self.running {
            return 0;
        }

        let mut intake = Intake {
            machine: &mut self.machine,
            last_sample: &mut self.last_sample,
            samples_seen: &mut self.samples_seen,
        };
        let delivered = self.source.deliver(&mut intake);

        self.machine.service_timer();
        delivered
    }

    /// Snapshot for debug readouts
    pub fn status(&self) -> DetectorStatus {
        let pending = self.machine.pending();
        DetectorStatus {
            running: self.running,
            confirmed: self.machine.confirmed_pose(),
            pending_target: pending.map(|p| p.target),
            pending_deadline_ms: pending.map(|p| p.deadline_ms),
            last_sample: self.last_sample,
            evidence: self.machine.last_evidence(),
            samples_seen: self.samples_seen,
        }
    }

    /// Get access to the state machine
    pub fn machine(&self) -> &DebounceStateMachine<T, L> {
        &self.machine
    }

    /// Get mutable access to the state machine
    pub fn machine_mut(&mut self) -> &mut DebounceStateMachine<T, L> {
        &mut self.machine
    }

    /// Get access to the sample source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get mutable access to the sample source
    ///
    /// Platform callbacks push through this.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S, T, L> PoseDetector<S, T, L>
where
    S: SampleSource,
    T: TransitionTimer + Clock,
    L: PoseListener,
{
    /// Time left until the pending confirmation, read from the timer's clock
    pub fn remaining_ms(&self) -> Option<u64> {
        self.status().remaining_ms(self.machine.timer().now_ms())
    }
}
