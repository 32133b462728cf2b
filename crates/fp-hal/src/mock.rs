use crate::{BackendEvent, Finger, HalDevice, HalError, HalModule, HalProvider, NotifyFn, Result};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

/// Calls a mock device has serviced, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall {
    SetNotify,
    Enroll { timeout_sec: u32 },
    Authenticate { operation_id: u64 },
    Cancel,
    Remove { fingers: Vec<Finger> },
    Enumerate,
    Close,
}

/// State shared between a mock device and the test that scripted it.
#[derive(Default)]
pub struct MockDeviceState {
    open_attempts: AtomicU32,
    close_status: AtomicI32,
    closed: AtomicBool,
    notify: Mutex<Option<NotifyFn>>,
    calls: Mutex<Vec<(OffsetDateTime, DeviceCall)>>,
}

impl MockDeviceState {
    /// How many times the owning module's `open` was attempted.
    pub fn open_attempts(&self) -> u32 {
        self.open_attempts.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn has_notify(&self) -> bool {
        match self.notify.lock() {
            Ok(slot) => slot.is_some(),
            Err(_) => false,
        }
    }

    /// Serviced calls without their arrival timestamps.
    pub fn calls(&self) -> Vec<DeviceCall> {
        match self.calls.lock() {
            Ok(calls) => calls.iter().map(|(_, call)| call.clone()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Deliver an event through the registered notification sink, the way
    /// the hardware would from one of its own threads. Returns false when no
    /// sink has been registered yet.
    pub fn fire(&self, event: &BackendEvent) -> bool {
        let notify = match self.notify.lock() {
            Ok(slot) => *slot,
            Err(_) => None,
        };
        match notify {
            Some(notify) => {
                notify(event);
                true
            }
            None => false,
        }
    }

    fn record(&self, call: DeviceCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((OffsetDateTime::now_utc(), call));
        }
    }
}

/// One scripted backend class with injectable failure points.
#[derive(Clone)]
pub struct MockModule {
    class: String,
    open_fails: bool,
    notify_fails: bool,
    state: Arc<MockDeviceState>,
}

impl MockModule {
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            open_fails: false,
            notify_fails: false,
            state: Arc::new(MockDeviceState::default()),
        }
    }

    /// Script `open` to fail for this class.
    pub fn with_open_failure(mut self) -> Self {
        self.open_fails = true;
        self
    }

    /// Script `set_notify` to be rejected after a successful open.
    pub fn with_notify_failure(mut self) -> Self {
        self.notify_fails = true;
        self
    }

    /// Status code `close` will report; zero is success.
    pub fn with_close_status(self, status: i32) -> Self {
        self.state.close_status.store(status, Ordering::SeqCst);
        self
    }

    /// Handle kept by the test to observe and drive the device.
    pub fn state(&self) -> Arc<MockDeviceState> {
        Arc::clone(&self.state)
    }
}

impl HalModule for MockModule {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn open(&self) -> Result<Box<dyn HalDevice>> {
        self.state.open_attempts.fetch_add(1, Ordering::SeqCst);
        if self.open_fails {
            return Err(HalError::OpenFailed(format!(
                "mock class {} refuses to open",
                self.class
            )));
        }
        Ok(Box::new(MockDevice {
            state: Arc::clone(&self.state),
            notify_fails: self.notify_fails,
        }))
    }
}

/// Provider backed by a fixed set of scripted modules.
#[derive(Default)]
pub struct MockProvider {
    modules: Vec<MockModule>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: MockModule) -> Self {
        self.modules.push(module);
        self
    }
}

impl HalProvider for MockProvider {
    fn resolve(&self, class_name: &str) -> Option<Box<dyn HalModule>> {
        self.modules
            .iter()
            .find(|module| module.class == class_name)
            .map(|module| Box::new(module.clone()) as Box<dyn HalModule>)
    }
}

/// Device handed out by a [`MockModule`]. All operations succeed and are
/// recorded on the shared state.
pub struct MockDevice {
    state: Arc<MockDeviceState>,
    notify_fails: bool,
}

impl HalDevice for MockDevice {
    fn set_notify(&mut self, notify: NotifyFn) -> Result<()> {
        if self.notify_fails {
            return Err(HalError::NotifyRejected("mock backend rejects callbacks"));
        }
        self.state.record(DeviceCall::SetNotify);
        if let Ok(mut slot) = self.state.notify.lock() {
            *slot = Some(notify);
        }
        Ok(())
    }

    fn enroll(&mut self, timeout_sec: u32) -> Result<()> {
        self.state.record(DeviceCall::Enroll { timeout_sec });
        Ok(())
    }

    fn authenticate(&mut self, operation_id: u64) -> Result<()> {
        self.state.record(DeviceCall::Authenticate { operation_id });
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        self.state.record(DeviceCall::Cancel);
        Ok(())
    }

    fn remove(&mut self, fingers: &[Finger]) -> Result<()> {
        self.state.record(DeviceCall::Remove {
            fingers: fingers.to_vec(),
        });
        Ok(())
    }

    fn enumerate(&mut self) -> Result<()> {
        self.state.record(DeviceCall::Enumerate);
        Ok(())
    }

    fn close(&mut self) -> i32 {
        self.state.record(DeviceCall::Close);
        self.state.closed.store(true, Ordering::SeqCst);
        self.state.close_status.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AcquiredInfo;

    fn sink(_event: &BackendEvent) {}

    #[test]
    fn test_fire_requires_registered_sink() {
        let module = MockModule::new("fpc");
        let state = module.state();
        let mut device = module.open().unwrap();

        assert!(!state.fire(&BackendEvent::Acquired(AcquiredInfo::Good)));
        device.set_notify(sink).unwrap();
        assert!(state.fire(&BackendEvent::Acquired(AcquiredInfo::Good)));
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let module = MockModule::new("fpc");
        let state = module.state();
        let mut device = module.open().unwrap();

        device.set_notify(sink).unwrap();
        device.enroll(60).unwrap();
        device.cancel().unwrap();
        assert_eq!(device.close(), 0);
        assert!(state.is_closed());
        assert_eq!(
            state.calls(),
            vec![
                DeviceCall::SetNotify,
                DeviceCall::Enroll { timeout_sec: 60 },
                DeviceCall::Cancel,
                DeviceCall::Close,
            ]
        );
    }

    #[test]
    fn test_close_status_is_scripted() {
        let module = MockModule::new("fpc").with_close_status(-22);
        let mut device = module.open().unwrap();
        assert_eq!(device.close(), -22);
    }
}
