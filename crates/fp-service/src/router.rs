use crate::coordinator::CoordinatorState;
use fp_hal::BackendEvent;
use std::sync::{Arc, Mutex, Weak};
use tracing::warn;

/// Single-slot registry mapping the fixed backend callback to the live
/// coordinator. The legacy module ABI gives the notification trampoline no
/// context, so lookup goes through process-wide state; set at coordinator
/// construction and cleared at teardown, which the dispatch path treats the
/// same as "no active session".
///
/// The lookup and the forward are not atomic with respect to a concurrent
/// session close: an event can pass the validity check and still reach a
/// session that is tearing down. Closing a session only prevents future
/// routing; it does not recall events already in flight.
pub struct RouterSlot {
    active: Mutex<Weak<CoordinatorState>>,
}

impl RouterSlot {
    pub const fn new() -> Self {
        Self {
            active: Mutex::new(Weak::new()),
        }
    }

    pub(crate) fn set(&self, coordinator: &Arc<CoordinatorState>) {
        if let Ok(mut slot) = self.active.lock() {
            *slot = Arc::downgrade(coordinator);
        }
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut slot) = self.active.lock() {
            *slot = Weak::new();
        }
    }

    /// Route one hardware event to the active session, or drop it. Never
    /// raises; stale or early events are only observable through logging.
    pub fn dispatch(&self, event: &BackendEvent) {
        let coordinator = match self.active.lock() {
            Ok(slot) => slot.upgrade(),
            Err(_) => None,
        };
        let Some(coordinator) = coordinator else {
            warn!("dropping hardware event, no coordinator registered");
            return;
        };
        match coordinator.active_session() {
            Some(session) if !session.is_closed() => session.notify(event),
            _ => warn!("dropping hardware event, no open session"),
        }
    }
}

impl Default for RouterSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide slot the fixed trampoline reads.
pub static GLOBAL_ROUTER: RouterSlot = RouterSlot::new();

/// Fixed notification trampoline registered with backends.
pub fn backend_notify(event: &BackendEvent) {
    GLOBAL_ROUTER.dispatch(event);
}
