//! Shared helpers for in-crate tests.

use crate::callback::{DeathRecipient, SessionCallback};
use crate::config::ServiceConfig;
use crate::coordinator::Coordinator;
use crate::router::RouterSlot;
use fp_hal::{
    AcquiredInfo, AuthToken, Finger, HalErrorCode, MockDeviceState, MockModule, MockProvider,
    NotifyFn,
};
use std::sync::{Arc, Mutex};

/// Events a test callback has seen, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum SeenEvent {
    Error(HalErrorCode),
    Acquired(AcquiredInfo),
    EnrollmentProgress(u32, u32),
    AuthSucceeded(u32),
    AuthFailed,
    Enumerated(usize, u32),
    Removed(usize, u32),
    LockoutTimed(i64),
    LockoutPermanent,
    LockoutCleared,
    SessionClosed,
}

/// Session callback that records everything and lets a test simulate the
/// remote endpoint dying.
#[derive(Default)]
pub struct RecordingCallback {
    seen: Mutex<Vec<SeenEvent>>,
    death: Mutex<Option<DeathRecipient>>,
    refuse_death_link: bool,
}

impl RecordingCallback {
    pub fn refusing_death_link() -> Self {
        Self {
            refuse_death_link: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<SeenEvent> {
        self.seen.lock().unwrap().clone()
    }

    /// Trigger the registered death hook, as the transport would after the
    /// remote side went away.
    pub fn kill_remote(&self) {
        let hook = self.death.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
    }

    fn push(&self, event: SeenEvent) {
        self.seen.lock().unwrap().push(event);
    }
}

impl SessionCallback for RecordingCallback {
    fn link_to_death(&self, recipient: DeathRecipient) -> bool {
        if self.refuse_death_link {
            return false;
        }
        *self.death.lock().unwrap() = Some(recipient);
        true
    }

    fn on_error(&self, error: HalErrorCode) {
        self.push(SeenEvent::Error(error));
    }

    fn on_acquired(&self, info: AcquiredInfo) {
        self.push(SeenEvent::Acquired(info));
    }

    fn on_enrollment_progress(&self, finger: Finger, samples_remaining: u32) {
        self.push(SeenEvent::EnrollmentProgress(finger.id, samples_remaining));
    }

    fn on_authentication_succeeded(&self, finger: Finger, _token: Option<AuthToken>) {
        self.push(SeenEvent::AuthSucceeded(finger.id));
    }

    fn on_authentication_failed(&self) {
        self.push(SeenEvent::AuthFailed);
    }

    fn on_enrollments_enumerated(&self, fingers: Vec<Finger>, remaining: u32) {
        self.push(SeenEvent::Enumerated(fingers.len(), remaining));
    }

    fn on_enrollments_removed(&self, fingers: Vec<Finger>, remaining: u32) {
        self.push(SeenEvent::Removed(fingers.len(), remaining));
    }

    fn on_lockout_timed(&self, duration_ms: i64) {
        self.push(SeenEvent::LockoutTimed(duration_ms));
    }

    fn on_lockout_permanent(&self) {
        self.push(SeenEvent::LockoutPermanent);
    }

    fn on_lockout_cleared(&self) {
        self.push(SeenEvent::LockoutCleared);
    }

    fn on_session_closed(&self) {
        self.push(SeenEvent::SessionClosed);
    }
}

/// Coordinator wired to a single working mock backend, registered in the
/// given router slot with the given notification sink.
pub fn coordinator_with_mock(
    router: &'static RouterSlot,
    notify: NotifyFn,
) -> (Coordinator, Arc<MockDeviceState>) {
    let module = MockModule::new("fpc");
    let state = module.state();
    let provider = MockProvider::new().with_module(module);
    let coordinator = Coordinator::with_router(
        ServiceConfig::default(),
        &provider,
        None,
        router,
        &["fpc"],
        notify,
    );
    (coordinator, state)
}
