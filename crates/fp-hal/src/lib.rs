//! fp-hal: backend contract, event model, and discovery for fingerprint
//! sensing modules

mod types;
pub use types::{AcquiredInfo, AuthToken, BackendEvent, Finger, HalErrorCode};

mod error;
pub use error::{HalError, Result};

mod traits;
pub use traits::{HalDevice, HalModule, HalProvider, NotifyFn};

mod discover;
pub use discover::{discover, CANDIDATE_CLASSES};

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{DeviceCall, MockDevice, MockDeviceState, MockModule, MockProvider};
