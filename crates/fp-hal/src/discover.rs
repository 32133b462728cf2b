use crate::{HalDevice, HalProvider, NotifyFn};
use tracing::{debug, error, info};

/// Candidate backend classes, tried in declared order.
pub const CANDIDATE_CLASSES: &[&str] = &[
    "fpc",
    "fpc_fod",
    "goodix",
    "goodix_fod",
    "goodix_fod6",
    "silead",
    "syna",
];

/// Try each candidate class in order and return the first device that both
/// opens and accepts the notification sink.
///
/// A failing candidate leaves no state behind; later candidates start from a
/// clean slate. When every candidate fails the caller gets `None` and session
/// creation is expected to fail later against the missing device.
pub fn discover(
    provider: &dyn HalProvider,
    classes: &[&str],
    notify: NotifyFn,
) -> Option<Box<dyn HalDevice>> {
    for class in classes {
        debug!("Probing fingerprint backend, class {}", class);
        let Some(module) = provider.resolve(class) else {
            error!("Can't resolve backend module, class {}", class);
            continue;
        };
        let mut device = match module.open() {
            Ok(device) => device,
            Err(e) => {
                error!("Can't open backend module, class {}: {}", class, e);
                continue;
            }
        };
        if let Err(e) = device.set_notify(notify) {
            error!("Can't register backend callback, class {}: {}", class, e);
            continue;
        }
        info!("Opened fingerprint backend, class {}", class);
        return Some(device);
    }
    error!("Can't open any backend module");
    None
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::{BackendEvent, MockModule, MockProvider};

    fn sink(_event: &BackendEvent) {}

    #[test]
    fn test_first_working_candidate_wins() {
        let a = MockModule::new("fpc").with_open_failure();
        let b = MockModule::new("goodix");
        let c = MockModule::new("syna");
        let (sa, sb, sc) = (a.state(), b.state(), c.state());
        let provider = MockProvider::new()
            .with_module(a)
            .with_module(b)
            .with_module(c);

        let device = discover(&provider, &["fpc", "goodix", "syna"], sink);
        assert!(device.is_some());
        assert_eq!(sa.open_attempts(), 1);
        assert_eq!(sb.open_attempts(), 1);
        assert_eq!(sc.open_attempts(), 0);
        assert!(sb.has_notify());
    }

    #[test]
    fn test_unresolvable_class_is_skipped() {
        let b = MockModule::new("goodix");
        let state = b.state();
        let provider = MockProvider::new().with_module(b);

        let device = discover(&provider, &["fpc", "goodix"], sink);
        assert!(device.is_some());
        assert_eq!(state.open_attempts(), 1);
    }

    #[test]
    fn test_notify_rejection_moves_to_next_candidate() {
        let a = MockModule::new("fpc").with_notify_failure();
        let b = MockModule::new("silead");
        let (sa, sb) = (a.state(), b.state());
        let provider = MockProvider::new().with_module(a).with_module(b);

        let device = discover(&provider, &["fpc", "silead"], sink);
        assert!(device.is_some());
        assert_eq!(sa.open_attempts(), 1);
        assert!(!sa.has_notify());
        assert!(sb.has_notify());
    }

    #[test]
    fn test_all_candidates_exhausted_returns_none() {
        let a = MockModule::new("fpc").with_open_failure();
        let b = MockModule::new("goodix").with_open_failure();
        let provider = MockProvider::new().with_module(a).with_module(b);

        assert!(discover(&provider, &["fpc", "goodix", "syna"], sink).is_none());
    }
}
