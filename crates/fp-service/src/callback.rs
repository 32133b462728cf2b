use fp_hal::{AcquiredInfo, AuthToken, Finger, HalErrorCode};

/// Hook invoked when the remote side of a callback becomes unreachable.
pub type DeathRecipient = Box<dyn Fn() + Send + Sync>;

/// Remote listener for session events, mirroring the IPC callback surface.
/// Event methods default to no-ops so listeners implement what they observe;
/// death-link support is mandatory because session teardown depends on it.
pub trait SessionCallback: Send + Sync {
    /// Register a hook invoked when the remote endpoint dies. Delivery is
    /// asynchronous and only eventually guaranteed. Returns false when the
    /// transport cannot deliver death notifications.
    fn link_to_death(&self, recipient: DeathRecipient) -> bool;

    fn on_error(&self, _error: HalErrorCode) {}
    fn on_acquired(&self, _info: AcquiredInfo) {}
    fn on_enrollment_progress(&self, _finger: Finger, _samples_remaining: u32) {}
    fn on_authentication_succeeded(&self, _finger: Finger, _token: Option<AuthToken>) {}
    fn on_authentication_failed(&self) {}
    fn on_enrollments_enumerated(&self, _fingers: Vec<Finger>, _remaining: u32) {}
    fn on_enrollments_removed(&self, _fingers: Vec<Finger>, _remaining: u32) {}
    fn on_lockout_timed(&self, _duration_ms: i64) {}
    fn on_lockout_permanent(&self) {}
    fn on_lockout_cleared(&self) {}
    fn on_session_closed(&self) {}
}
