use crate::callback::SessionCallback;
use crate::lockout::{LockoutMode, LockoutTracker};
use crate::udfps::UdfpsHandler;
use crate::{Result, ServiceError};
use fp_hal::{BackendEvent, Finger, HalDevice};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Shared handle to the one open backend device. The coordinator owns the
/// slot for the process lifetime; sessions only borrow through it.
pub type DeviceSlot = Arc<Mutex<Option<Box<dyn HalDevice>>>>;

/// The single active enroll/authenticate/remove interaction, bound to one
/// user and one remote callback. Lives as long as either the coordinator's
/// routing reference or the remote caller holds it; closes explicitly or
/// when the remote endpoint dies.
pub struct Session {
    user_id: i32,
    device: DeviceSlot,
    udfps: Option<Arc<dyn UdfpsHandler>>,
    callback: Arc<dyn SessionCallback>,
    lockout: Mutex<LockoutTracker>,
    closed: AtomicBool,
}

impl Session {
    pub(crate) fn new(
        device: DeviceSlot,
        udfps: Option<Arc<dyn UdfpsHandler>>,
        user_id: i32,
        callback: Arc<dyn SessionCallback>,
    ) -> Self {
        Self {
            user_id,
            device,
            udfps,
            callback,
            lockout: Mutex::new(LockoutTracker::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Forward one hardware message to the remote callback. Runs on
    /// backend-owned threads and must not block.
    pub fn notify(&self, event: &BackendEvent) {
        match event {
            BackendEvent::Error(code) => {
                warn!("backend reported error {:?}", code);
                self.callback.on_error(*code);
            }
            BackendEvent::Acquired(acquired) => {
                if let Some(udfps) = &self.udfps {
                    udfps.on_acquired(*acquired);
                }
                self.callback.on_acquired(*acquired);
            }
            BackendEvent::EnrollProgress {
                finger,
                samples_remaining,
            } => {
                self.callback
                    .on_enrollment_progress(*finger, *samples_remaining);
            }
            BackendEvent::Authenticated { finger, token } => {
                if finger.id == 0 {
                    self.handle_failed_authentication();
                } else {
                    info!("authenticated {} for user {}", finger, self.user_id);
                    let cleared = match self.lockout.lock() {
                        Ok(mut lockout) => {
                            let had_failures = lockout.failed_attempts() > 0;
                            lockout.reset();
                            had_failures
                        }
                        Err(_) => false,
                    };
                    if cleared {
                        self.callback.on_lockout_cleared();
                    }
                    self.callback
                        .on_authentication_succeeded(*finger, token.clone());
                }
            }
            BackendEvent::Enumerated { fingers, remaining } => {
                self.callback
                    .on_enrollments_enumerated(fingers.clone(), *remaining);
            }
            BackendEvent::Removed { fingers, remaining } => {
                self.callback
                    .on_enrollments_removed(fingers.clone(), *remaining);
            }
        }
    }

    fn handle_failed_authentication(&self) {
        let verdict = match self.lockout.lock() {
            Ok(mut lockout) => {
                lockout.add_failed_attempt();
                Some((lockout.mode(), lockout.remaining_ms()))
            }
            Err(_) => None,
        };
        match verdict {
            Some((LockoutMode::Permanent, _)) => self.callback.on_lockout_permanent(),
            Some((LockoutMode::Timed, remaining_ms)) => {
                self.callback.on_lockout_timed(remaining_ms)
            }
            Some((LockoutMode::None, _)) | None => self.callback.on_authentication_failed(),
        }
    }

    fn with_device<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut dyn HalDevice) -> fp_hal::Result<()>,
    {
        let mut guard = self
            .device
            .lock()
            .map_err(|_| ServiceError::HardwareUnavailable)?;
        match guard.as_mut() {
            Some(device) => op(device.as_mut()).map_err(ServiceError::from),
            None => Err(ServiceError::HardwareUnavailable),
        }
    }

    pub fn enroll(&self, timeout_sec: u32) -> Result<()> {
        self.with_device(|device| device.enroll(timeout_sec))
    }

    /// Start authentication, unless a lockout is in force; a locked-out
    /// attempt is reported through the callback and never reaches the
    /// hardware.
    pub fn authenticate(&self, operation_id: u64) -> Result<()> {
        let verdict = match self.lockout.lock() {
            Ok(lockout) => (lockout.mode(), lockout.remaining_ms()),
            Err(_) => (LockoutMode::None, 0),
        };
        match verdict {
            (LockoutMode::Permanent, _) => {
                warn!("authentication refused, permanent lockout");
                self.callback.on_lockout_permanent();
                Ok(())
            }
            (LockoutMode::Timed, remaining_ms) => {
                warn!("authentication refused, locked out for {}ms", remaining_ms);
                self.callback.on_lockout_timed(remaining_ms);
                Ok(())
            }
            (LockoutMode::None, _) => self.with_device(|device| device.authenticate(operation_id)),
        }
    }

    pub fn cancel(&self) -> Result<()> {
        self.with_device(|device| device.cancel())
    }

    pub fn remove_enrollments(&self, fingers: &[Finger]) -> Result<()> {
        self.with_device(|device| device.remove(fingers))
    }

    pub fn enumerate_enrollments(&self) -> Result<()> {
        self.with_device(|device| device.enumerate())
    }

    /// Close the session. Idempotent. The router drops future hardware
    /// events once the closed flag is set; events already in flight may
    /// still be delivered.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.cancel() {
            debug!("cancel during close failed: {}", e);
        }
        info!("session closed for user {}", self.user_id);
        self.callback.on_session_closed();
    }

    /// The remote endpoint died; nobody is listening any more.
    pub(crate) fn on_remote_died(&self) {
        warn!(
            "remote endpoint died, closing session for user {}",
            self.user_id
        );
        self.close();
    }
}
