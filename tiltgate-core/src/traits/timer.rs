//! Clock and deferred-callback traits

/// Handle for one scheduled deadline
///
/// Tokens are issued by a `TransitionTimer` and are only meaningful to the
/// timer that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerToken(pub u32);

/// Monotonic millisecond clock
///
/// The debounce machine itself only sees sample timestamps. Timers that
/// also keep time implement this so `PoseDetector::remaining_ms` and
/// drivers or test harnesses can read the same timebase.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Cancellable single-shot timer
///
/// Implementations report expiry by polling rather than by calling back
/// into the owner, which keeps ownership of the state machine linear.
pub trait TransitionTimer {
    /// Arm a single-shot timer that expires at `deadline_ms`
    fn schedule(&mut self, deadline_ms: u64) -> TimerToken;

    /// Disarm a timer
    ///
    /// Cancelling a token that already fired, was already cancelled or was
    /// never issued is a no-op.
    fn cancel(&mut self, token: TimerToken);

    /// Take one armed timer whose deadline has passed
    ///
    /// Each token is returned at most once; a cancelled token is never
    /// returned.
    fn poll_expired(&mut self) -> Option<TimerToken>;
}

impl<T: TransitionTimer + ?Sized> TransitionTimer for &mut T {
    fn schedule(&mut self, deadline_ms: u64) -> TimerToken {
        (**self).schedule(deadline_ms)
    }

    fn cancel(&mut self, token: TimerToken) {
        (**self).cancel(token)
    }

    fn poll_expired(&mut self) -> Option<TimerToken> {
        (**self).poll_expired()
    }
}
