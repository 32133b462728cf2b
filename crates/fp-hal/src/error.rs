use thiserror::Error;

pub type Result<T, E = HalError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum HalError {
    #[error("backend open failed: {0}")]
    OpenFailed(String),
    #[error("backend rejected notify callback: {0}")]
    NotifyRejected(&'static str),
    #[error("operation not supported by this backend: {0}")]
    Unsupported(&'static str),
    #[error("I/O error: {0}")]
    Io(String),
}
