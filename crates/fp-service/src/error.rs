use fp_hal::HalError;
use thiserror::Error;

pub type Result<T, E = ServiceError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no fingerprint hardware available")]
    HardwareUnavailable,
    #[error("backend error: {0}")]
    Hal(#[from] HalError),
}
