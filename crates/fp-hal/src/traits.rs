use crate::{BackendEvent, Finger, Result};

/// Notification sink signature. The legacy module ABI registers a single
/// static entry point with no per-registration context, so implementations
/// must route through process-wide state.
pub type NotifyFn = fn(&BackendEvent);

/// One installable backend implementation, resolved by class name.
pub trait HalModule {
    /// Class name this module was resolved under (e.g. "fpc", "goodix").
    fn class_name(&self) -> &str;

    /// Open a device handle on this module.
    fn open(&self) -> Result<Box<dyn HalDevice>>;
}

/// Resolves candidate class names to concrete modules.
pub trait HalProvider {
    fn resolve(&self, class_name: &str) -> Option<Box<dyn HalModule>>;
}

/// An open connection to a sensing backend.
pub trait HalDevice: Send {
    /// Register the notification sink. Must succeed before any sensing
    /// operation is issued.
    fn set_notify(&mut self, notify: NotifyFn) -> Result<()>;

    /// Start an enrollment capture; progress arrives via notifications.
    fn enroll(&mut self, timeout_sec: u32) -> Result<()>;

    /// Start an authentication capture for the given operation.
    fn authenticate(&mut self, operation_id: u64) -> Result<()>;

    /// Cancel whatever capture is in flight.
    fn cancel(&mut self) -> Result<()>;

    /// Remove the given templates.
    fn remove(&mut self, fingers: &[Finger]) -> Result<()>;

    /// Enumerate enrolled templates; results arrive via notifications.
    fn enumerate(&mut self) -> Result<()>;

    /// Close the device. Returns the raw backend status code; zero is
    /// success. The handle is considered released either way.
    fn close(&mut self) -> i32;
}
