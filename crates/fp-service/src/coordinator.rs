use crate::callback::SessionCallback;
use crate::config::{SensorKind, ServiceConfig};
use crate::props::{build_sensor_props, SensorProps};
use crate::router::{backend_notify, RouterSlot, GLOBAL_ROUTER};
use crate::session::{DeviceSlot, Session};
use crate::udfps::{UdfpsHandler, UdfpsHandlerFactory};
use crate::{Result, ServiceError};
use fp_hal::{discover, HalProvider, NotifyFn, CANDIDATE_CLASSES};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// State shared between the coordinator handle and the notification router.
pub struct CoordinatorState {
    config: ServiceConfig,
    device: DeviceSlot,
    udfps: Option<Arc<dyn UdfpsHandler>>,
    session: Mutex<Option<Arc<Session>>>,
}

impl CoordinatorState {
    pub(crate) fn active_session(&self) -> Option<Arc<Session>> {
        match self.session.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }
}

/// Owns the opened backend device for the process lifetime and brokers the
/// single active session. Construction registers with the router; teardown
/// deregisters and closes the device exactly once.
pub struct Coordinator {
    state: Arc<CoordinatorState>,
    router: &'static RouterSlot,
}

impl Coordinator {
    /// Discover a backend over the default candidate list and register the
    /// process-wide notification trampoline with it.
    pub fn new(
        config: ServiceConfig,
        provider: &dyn HalProvider,
        udfps_factory: Option<&dyn UdfpsHandlerFactory>,
    ) -> Self {
        Self::with_router(
            config,
            provider,
            udfps_factory,
            &GLOBAL_ROUTER,
            CANDIDATE_CLASSES,
            backend_notify,
        )
    }

    /// As [`Coordinator::new`] with an explicit router slot, candidate list,
    /// and notification sink.
    pub fn with_router(
        config: ServiceConfig,
        provider: &dyn HalProvider,
        udfps_factory: Option<&dyn UdfpsHandlerFactory>,
        router: &'static RouterSlot,
        classes: &[&str],
        notify: NotifyFn,
    ) -> Self {
        let device: DeviceSlot = Arc::new(Mutex::new(discover(provider, classes, notify)));

        let udfps = match (config.sensor_kind, udfps_factory) {
            (SensorKind::UnderDisplayOptical, Some(factory)) => {
                info!("under-display optical sensor selected");
                let handler = factory.create();
                if handler.is_none() {
                    error!("Can't create under-display touch handler");
                }
                handler
            }
            (SensorKind::UnderDisplayOptical, None) => {
                error!("under-display sensor configured without a touch handler factory");
                None
            }
            _ => None,
        };

        let state = Arc::new(CoordinatorState {
            config,
            device,
            udfps,
            session: Mutex::new(None),
        });
        router.set(&state);
        Self { state, router }
    }

    pub fn has_device(&self) -> bool {
        match self.state.device.lock() {
            Ok(slot) => slot.is_some(),
            Err(_) => false,
        }
    }

    /// Static capability descriptor; always a single element.
    pub fn sensor_props(&self) -> Vec<SensorProps> {
        build_sensor_props(&self.state.config)
    }

    /// Create the single active session bound to the device, the user, and
    /// the remote callback.
    ///
    /// Fails with [`ServiceError::HardwareUnavailable`] when discovery found
    /// no backend. A still-open existing session is a caller contract
    /// violation and aborts rather than silently replacing the notification
    /// target.
    pub fn create_session(
        &self,
        sensor_id: i32,
        user_id: i32,
        callback: Arc<dyn SessionCallback>,
    ) -> Result<Arc<Session>> {
        // Single sensor per instance; the id is accepted but not dispatched on.
        let _ = sensor_id;
        {
            let device = self
                .state
                .device
                .lock()
                .map_err(|_| ServiceError::HardwareUnavailable)?;
            if device.is_none() {
                error!("refusing to create session, no backend device");
                return Err(ServiceError::HardwareUnavailable);
            }
        }

        let mut slot = self
            .state
            .session
            .lock()
            .map_err(|_| ServiceError::HardwareUnavailable)?;
        assert!(
            slot.as_ref().map_or(true, |session| session.is_closed()),
            "Open session already exists!"
        );

        let session = Arc::new(Session::new(
            Arc::clone(&self.state.device),
            self.state.udfps.clone(),
            user_id,
            Arc::clone(&callback),
        ));
        *slot = Some(Arc::clone(&session));
        drop(slot);

        let weak = Arc::downgrade(&session);
        let linked = callback.link_to_death(Box::new(move || {
            if let Some(session) = weak.upgrade() {
                session.on_remote_died();
            }
        }));
        if !linked {
            warn!("could not link session callback to remote death");
        }

        info!("session created for user {}", user_id);
        Ok(session)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        // Torn down must look identical to "no active session" to the
        // router before the device goes away.
        self.router.clear();

        let Ok(mut device) = self.state.device.lock() else {
            return;
        };
        let Some(mut device) = device.take() else {
            error!("no backend device to close");
            return;
        };
        let status = device.close();
        if status != 0 {
            error!("Can't close fingerprint backend, status {}", status);
        }
    }
}
