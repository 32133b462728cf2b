//! fp-service: fingerprint sensor coordinator
//!
//! Sits between the device's biometric service surface and a vendor sensing
//! backend: discovers the backend, owns its handle, exposes the static sensor
//! descriptor, and brokers the single active session that hardware events are
//! routed to.

mod error;
pub use error::{Result, ServiceError};

mod config;
pub use config::{SensorKind, SensorLayout, ServiceConfig};

mod props;
pub use props::{
    build_sensor_props, ComponentInfo, SensorLocation, SensorProps, SensorStrength,
    MAX_ENROLLMENTS_PER_USER, SENSOR_ID,
};

mod lockout;
pub use lockout::{LockoutMode, LockoutTracker};

mod callback;
pub use callback::{DeathRecipient, SessionCallback};

mod udfps;
pub use udfps::{NoopUdfpsHandler, NoopUdfpsHandlerFactory, UdfpsHandler, UdfpsHandlerFactory};

mod session;
pub use session::{DeviceSlot, Session};

mod router;
pub use router::{backend_notify, RouterSlot, GLOBAL_ROUTER};

mod coordinator;
pub use coordinator::{Coordinator, CoordinatorState};

#[cfg(test)]
pub(crate) mod testutil;
