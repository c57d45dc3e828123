//! Debounce state machine definition
//!
//! A pose change is confirmed only after the new classification has been
//! seen without interruption for the configured stability time. A single
//! contrary sample aborts the pending confirmation without reporting
//! anything.
//!
//! The machine owns at most one armed timer. Repeated samples with the same
//! classification leave that timer alone; only a change of classification
//! cancels or re-arms it, so a fast sample stream cannot keep pushing the
//! deadline back.

use crate::config::PoseConfig;
use crate::orientation::{evaluate, OrientationSample, Pose, PoseEvidence};
use crate::traits::{PoseListener, SampleSink, TimerToken, TransitionTimer};

use super::pending::{DebounceState, PendingTransition};

/// Dwell-time debounce over pose classifications
pub struct DebounceStateMachine<T, L> {
    config: PoseConfig,
    state: DebounceState,
    timer: T,
    listener: L,
    last_evidence: Option<PoseEvidence>,
}

impl<T: TransitionTimer, L: PoseListener> DebounceStateMachine<T, L> {
    /// Create a machine in the normal pose with nothing pending
    pub fn new(config: PoseConfig, timer: T, listener: L) -> Self {
        Self {
            config,
            state: DebounceState::new(),
            timer,
            listener,
            last_evidence: None,
        }
    }

    /// Last pose reported to the listener
    pub fn confirmed_pose(&self) -> Pose {
        self.state.confirmed
    }

    /// In-flight confirmation, if any
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.state.pending.as_ref()
    }

    /// Full debounce state
    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Configuration this machine was built with
    pub fn config(&self) -> &PoseConfig {
        &self.config
    }

    /// Predicates of the most recent sample
    pub fn last_evidence(&self) -> Option<PoseEvidence> {
        self.last_evidence
    }

    /// Get access to the underlying timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Get mutable access to the underlying timer
    ///
    /// Used by drivers that advance a simulated clock.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Get access to the listener
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Get mutable access to the listener
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Process one sample taken at `now_ms`
    ///
    /// If a pending deadline has already been reached, that transition is
    /// confirmed first, as its timer would have fired before this sample
    /// arrived. Returns the pose confirmed during this call, if any.
    pub fn on_sample(&mut self, sample: &OrientationSample, now_ms: u64) -> Option<Pose> {
        let fired = match self.state.pending {
            Some(pending) if pending.is_due(now_ms) => {
                self.timer.cancel(pending.token);
                Some(self.confirm(pending))
            }
            _ => None,
        };

        let evidence = evaluate(sample, &self.config);
        self.last_evidence = Some(evidence);
        let pose = evidence.pose();

        if pose == self.state.confirmed {
            // Back in the confirmed pose before the dwell elapsed
            self.cancel_pending();
            return fired;
        }

        match self.state.pending {
            // Same classification as the armed timer: keep its deadline
            Some(pending) if pending.target == pose => {}
            Some(_) => {
                self.cancel_pending();
                self.schedule(pose, now_ms);
            }
            None => self.schedule(pose, now_ms),
        }

        fired
    }

    /// Handle a timer expiry reported by the scheduling mechanism
    ///
    /// Tokens that do not match the pending transition (cancelled or
    /// superseded timers) are ignored.
    pub fn on_timer_fire(&mut self, token: TimerToken) -> Option<Pose> {
        match self.state.pending {
            Some(pending) if pending.token == token => Some(self.confirm(pending)),
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Ignoring stale timer {}", token.0);
                None
            }
        }
    }

    /// Fire every expired timer
    ///
    /// Returns the last pose confirmed, if any.
    pub fn service_timer(&mut self) -> Option<Pose> {
        let mut fired = None;
        while let Some(token) = self.timer.poll_expired() {
            if let Some(pose) = self.on_timer_fire(token) {
                fired = Some(pose);
            }
        }
        fired
    }

    /// Cancel anything pending and return to the normal pose
    ///
    /// No listener method is called.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state.confirmed = Pose::Normal;
        self.last_evidence = None;
    }

    /// Cancel anything pending and hand back the timer and listener
    pub fn into_parts(mut self) -> (T, L) {
        self.cancel_pending();
        (self.timer, self.listener)
    }

    fn schedule(&mut self, target: Pose, now_ms: u64) {
        let deadline_ms = now_ms.saturating_add(self.config.stability_time_ms as u64);
        let token = self.timer.schedule(deadline_ms);

        #[cfg(feature = "defmt")]
        defmt::debug!("Pending {} at {} ms (deadline {} ms)", target, now_ms, deadline_ms);

        self.state.pending = Some(PendingTransition {
            target,
            scheduled_at_ms: now_ms,
            deadline_ms,
            token,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.state.pending.take() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Cancelled pending {}", pending.target);

            self.timer.cancel(pending.token);
        }
    }

    fn confirm(&mut self, pending: PendingTransition) -> Pose {
        self.state.pending = None;
        self.state.confirmed = pending.target;

        #[cfg(feature = "defmt")]
        defmt::info!("Pose confirmed: {} at {} ms", pending.target, pending.deadline_ms);

        match pending.target {
            Pose::Target => self.listener.on_target_pose(),
            Pose::Normal => self.listener.on_normal_pose(),
        }

        pending.target
    }
}

impl<T: TransitionTimer, L: PoseListener> SampleSink for DebounceStateMachine<T, L> {
    fn push_sample(&mut self, sample: OrientationSample, now_ms: u64) {
        self.on_sample(&sample, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Timer with an explicit clock, advanced by the test
    #[derive(Default)]
    struct MockTimer {
        now_ms: u64,
        next_id: u32,
        armed: Vec<(TimerToken, u64)>,
        scheduled: usize,
    }

    impl MockTimer {
        fn advance_to(&mut self, now_ms: u64) {
            self.now_ms = now_ms;
        }
    }

    impl TransitionTimer for MockTimer {
        fn schedule(&mut self, deadline_ms: u64) -> TimerToken {
            self.next_id += 1;
            self.scheduled += 1;
            let token = TimerToken(self.next_id);
            self.armed.push((token, deadline_ms));
            token
        }

        fn cancel(&mut self, token: TimerToken) {
            self.armed.retain(|(t, _)| *t != token);
        }

        fn poll_expired(&mut self) -> Option<TimerToken> {
            let now = self.now_ms;
            let pos = self.armed.iter().position(|(_, deadline)| *deadline <= now)?;
            Some(self.armed.remove(pos).0)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Target,
        Normal,
    }

    #[derive(Default)]
    struct RecordingListener {
        calls: Vec<Call>,
    }

    impl PoseListener for RecordingListener {
        fn on_target_pose(&mut self) {
            self.calls.push(Call::Target);
        }

        fn on_normal_pose(&mut self) {
            self.calls.push(Call::Normal);
        }
    }

    type Machine = DebounceStateMachine<MockTimer, RecordingListener>;

    fn machine() -> Machine {
        DebounceStateMachine::new(
            PoseConfig::default(),
            MockTimer::default(),
            RecordingListener::default(),
        )
    }

    fn target_sample() -> OrientationSample {
        OrientationSample::from_degrees(10.0, 5.0, 85.0)
    }

    fn normal_sample() -> OrientationSample {
        OrientationSample::from_degrees(10.0, 5.0, 10.0)
    }

    /// Event loop step: fire due timers at `now_ms`, then deliver the sample
    fn step(machine: &mut Machine, sample: OrientationSample, now_ms: u64) -> Option<Pose> {
        machine.timer_mut().advance_to(now_ms);
        let fired = machine.service_timer();
        machine.on_sample(&sample, now_ms).or(fired)
    }

    fn idle_until(machine: &mut Machine, now_ms: u64) -> Option<Pose> {
        machine.timer_mut().advance_to(now_ms);
        machine.service_timer()
    }

    #[test]
    fn test_initial_state() {
        let machine = machine();
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert!(machine.pending().is_none());
        assert!(machine.last_evidence().is_none());
    }

    #[test]
    fn test_sustained_target_fires_once_at_deadline() {
        let mut machine = machine();
        let mut fired_at = None;

        for t in (0..=600).step_by(50) {
            if step(&mut machine, target_sample(), t) == Some(Pose::Target) {
                assert!(fired_at.is_none(), "fired twice");
                fired_at = Some(t);
            }
        }

        assert_eq!(fired_at, Some(500));
        assert_eq!(machine.listener().calls, vec![Call::Target]);
        assert_eq!(machine.confirmed_pose(), Pose::Target);
    }

    #[test]
    fn test_flicker_does_not_fire() {
        let mut machine = machine();

        step(&mut machine, target_sample(), 0);
        assert_eq!(machine.pending().map(|p| p.target), Some(Pose::Target));

        step(&mut machine, normal_sample(), 200);
        assert!(machine.pending().is_none());
        assert!(machine.timer().armed.is_empty());

        assert_eq!(idle_until(&mut machine, 600), None);
        assert!(machine.listener().calls.is_empty());
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
    }

    #[test]
    fn test_not_confirmed_before_deadline() {
        let mut machine = machine();

        step(&mut machine, target_sample(), 0);
        step(&mut machine, target_sample(), 499);
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert!(machine.listener().calls.is_empty());

        assert_eq!(idle_until(&mut machine, 500), Some(Pose::Target));
        assert_eq!(machine.listener().calls, vec![Call::Target]);
    }

    #[test]
    fn test_repeated_samples_keep_deadline() {
        let mut machine = machine();

        // 100 Hz stream; the deadline must not move with each sample
        for t in (0..500).step_by(10) {
            step(&mut machine, target_sample(), t);
        }

        assert_eq!(machine.timer().scheduled, 1);
        let pending = machine.pending().copied().unwrap();
        assert_eq!(pending.scheduled_at_ms, 0);
        assert_eq!(pending.deadline_ms, 500);

        assert_eq!(step(&mut machine, target_sample(), 500), Some(Pose::Target));
    }

    #[test]
    fn test_sample_past_deadline_confirms_first() {
        let mut machine = machine();

        machine.on_sample(&target_sample(), 0);
        // Timer never serviced; a late sample still sees the deadline passed
        assert_eq!(machine.on_sample(&normal_sample(), 700), Some(Pose::Target));
        assert_eq!(machine.listener().calls, vec![Call::Target]);

        // The normal sample now starts the transition back
        let pending = machine.pending().copied().unwrap();
        assert_eq!(pending.target, Pose::Normal);
        assert_eq!(pending.deadline_ms, 1200);
        assert_eq!(machine.timer().armed.len(), 1);
    }

    #[test]
    fn test_return_to_normal_is_debounced() {
        let mut machine = machine();
        for t in (0..=500).step_by(50) {
            step(&mut machine, target_sample(), t);
        }
        assert_eq!(machine.confirmed_pose(), Pose::Target);

        // One normal sample starts a pending transition back
        step(&mut machine, normal_sample(), 600);
        assert_eq!(machine.pending().map(|p| p.target), Some(Pose::Normal));

        // Target again cancels it
        step(&mut machine, target_sample(), 650);
        assert!(machine.pending().is_none());
        assert_eq!(idle_until(&mut machine, 1500), None);
        assert_eq!(machine.listener().calls, vec![Call::Target]);

        // Sustained normal is eventually confirmed
        for t in (1500..=2000).step_by(50) {
            step(&mut machine, normal_sample(), t);
        }
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert_eq!(machine.listener().calls, vec![Call::Target, Call::Normal]);
    }

    #[test]
    fn test_reset_is_silent() {
        let mut machine = machine();
        for t in (0..=500).step_by(50) {
            step(&mut machine, target_sample(), t);
        }
        step(&mut machine, normal_sample(), 550);
        assert!(machine.pending().is_some());

        machine.reset();
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert!(machine.pending().is_none());
        assert!(machine.timer().armed.is_empty());
        assert_eq!(idle_until(&mut machine, 5000), None);
        assert_eq!(machine.listener().calls, vec![Call::Target]);

        // Reset again with nothing pending is harmless
        machine.reset();
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
    }

    #[test]
    fn test_stale_token_ignored() {
        let mut machine = machine();
        step(&mut machine, target_sample(), 0);
        let token = machine.pending().unwrap().token;

        step(&mut machine, normal_sample(), 100);
        assert_eq!(machine.on_timer_fire(token), None);
        assert_eq!(machine.on_timer_fire(TimerToken(999)), None);
        assert!(machine.listener().calls.is_empty());
    }

    #[test]
    fn test_fired_token_only_confirms_once() {
        let mut machine = machine();
        step(&mut machine, target_sample(), 0);
        let token = machine.pending().unwrap().token;

        assert_eq!(machine.on_timer_fire(token), Some(Pose::Target));
        assert_eq!(machine.on_timer_fire(token), None);
        assert_eq!(machine.listener().calls, vec![Call::Target]);
    }

    #[test]
    fn test_unknown_samples_stay_normal() {
        let mut machine = machine();
        let partial = OrientationSample::new(None, Some(5.0), Some(85.0));

        for t in (0..2000).step_by(50) {
            step(&mut machine, partial, t);
            step(&mut machine, OrientationSample::unknown(), t + 25);
        }

        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert_eq!(machine.timer().scheduled, 0);
        assert!(machine.listener().calls.is_empty());
    }

    #[test]
    fn test_zero_stability_time() {
        let config = PoseConfig::new(70.0, 20.0, 0).unwrap();
        let mut machine = DebounceStateMachine::new(
            config,
            MockTimer::default(),
            RecordingListener::default(),
        );

        machine.timer_mut().advance_to(100);
        machine.on_sample(&target_sample(), 100);
        assert_eq!(machine.confirmed_pose(), Pose::Normal);
        assert_eq!(machine.service_timer(), Some(Pose::Target));
    }

    #[test]
    fn test_into_parts_disarms_timer() {
        let mut machine = machine();
        step(&mut machine, target_sample(), 0);

        let (mut timer, listener) = machine.into_parts();
        assert!(timer.armed.is_empty());
        timer.advance_to(1000);
        assert_eq!(timer.poll_expired(), None);
        assert!(listener.calls.is_empty());
    }

    #[test]
    fn test_fn_listener_callbacks() {
        use crate::traits::FnListener;

        let mut targets = 0;
        let mut normals = 0;
        {
            let mut machine = DebounceStateMachine::new(
                PoseConfig::default(),
                MockTimer::default(),
                FnListener::new(|| targets += 1, || normals += 1),
            );
            machine.on_sample(&target_sample(), 0);
            machine.on_sample(&normal_sample(), 600);
            machine.on_sample(&normal_sample(), 1200);
        }

        assert_eq!(targets, 1);
        assert_eq!(normals, 1);
    }
}
