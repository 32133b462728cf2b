use fp_hal::AcquiredInfo;
use std::sync::Arc;

/// Touch-coordination hooks for under-display sensors. Created around device
/// availability and torn down with the coordinator.
pub trait UdfpsHandler: Send + Sync {
    fn on_finger_down(&self, x: i32, y: i32);
    fn on_finger_up(&self);
    fn on_acquired(&self, info: AcquiredInfo);
}

/// Produces the platform handler when the display stack provides one.
pub trait UdfpsHandlerFactory: Send + Sync {
    fn create(&self) -> Option<Arc<dyn UdfpsHandler>>;
}

/// Handler used when no platform display integration is present.
#[derive(Default)]
pub struct NoopUdfpsHandler;

impl UdfpsHandler for NoopUdfpsHandler {
    fn on_finger_down(&self, _x: i32, _y: i32) {}
    fn on_finger_up(&self) {}
    fn on_acquired(&self, _info: AcquiredInfo) {}
}

/// Factory that always yields the no-op handler.
#[derive(Default)]
pub struct NoopUdfpsHandlerFactory;

impl UdfpsHandlerFactory for NoopUdfpsHandlerFactory {
    fn create(&self) -> Option<Arc<dyn UdfpsHandler>> {
        Some(Arc::new(NoopUdfpsHandler))
    }
}
