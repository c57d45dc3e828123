//! Pose change listener

/// Receives confirmed pose changes
///
/// Exactly one method is called per confirmed change. Nothing is called
/// on reset or teardown.
pub trait PoseListener {
    /// The device has been held in the target pose for the dwell time
    fn on_target_pose(&mut self);

    /// The device has been back in the normal pose for the dwell time
    fn on_normal_pose(&mut self);
}

impl<L: PoseListener + ?Sized> PoseListener for &mut L {
    fn on_target_pose(&mut self) {
        (**self).on_target_pose()
    }

    fn on_normal_pose(&mut self) {
        (**self).on_normal_pose()
    }
}

/// Listener built from a pair of closures
pub struct FnListener<T, N> {
    on_target: T,
    on_normal: N,
}

impl<T, N> FnListener<T, N>
where
    T: FnMut(),
    N: FnMut(),
{
    /// Create a listener from the two callbacks
    pub fn new(on_target: T, on_normal: N) -> Self {
        Self {
            on_target,
            on_normal,
        }
    }
}

impl<T, N> PoseListener for FnListener<T, N>
where
    T: FnMut(),
    N: FnMut(),
{
    fn on_target_pose(&mut self) {
        (self.on_target)()
    }

    fn on_normal_pose(&mut self) {
        (self.on_normal)()
    }
}
