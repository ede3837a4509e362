//! Interception hub implementation.
//!
//! [`InterceptHub`] implements the `TrafficHook` port for harnesses that
//! route the traffic under test through the test process itself (a
//! proxy, a recording client middleware, a replayed capture). The
//! harness feeds each completed exchange into [`record`]; the hub runs
//! every matching observer and hands the violations back for the
//! harness to surface as test failures.
//!
//! [`record`]: InterceptHub::record

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use edgewatch_application::ports::{ExchangeObserver, ObservationHandle, TrafficHook};
use edgewatch_domain::{CapturedResponse, Exchange, Outcome, PathMatcher, Violation};

type SharedObserver = Arc<dyn Fn(&Exchange) -> Outcome + Send + Sync>;

struct Registration {
    id: Uuid,
    matcher: PathMatcher,
    observer: SharedObserver,
}

/// In-process implementation of the `TrafficHook` port.
///
/// Clones share the same registration table, so a harness can hold one
/// clone for recording while the assertion facade owns another.
#[derive(Clone, Default)]
pub struct InterceptHub {
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl InterceptHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed exchange and dispatches it to every
    /// observer whose matcher accepts the path, in registration order.
    ///
    /// Returns the violations the observers reported, also in
    /// registration order; an empty vector means the exchange passed
    /// every active observation.
    #[must_use]
    pub fn record(&self, path: impl Into<String>, response: CapturedResponse) -> Vec<Violation> {
        let exchange = Exchange::new(path, response);

        // Snapshot the matching observers, then dispatch outside the
        // lock so observers may register or revoke freely.
        let matching: Vec<SharedObserver> = self
            .lock()
            .iter()
            .filter(|registration| registration.matcher.matches(exchange.path()))
            .map(|registration| Arc::clone(&registration.observer))
            .collect();

        matching
            .iter()
            .filter_map(|observer| observer(&exchange).err())
            .collect()
    }

    /// Ends every active observation. Called between tests.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Number of active observations.
    #[must_use]
    pub fn active_observations(&self) -> usize {
        self.lock().len()
    }

    fn remove(&self, id: Uuid) {
        self.lock().retain(|registration| registration.id != id);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Registration>> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TrafficHook for InterceptHub {
    fn observe(&self, matcher: PathMatcher, observer: ExchangeObserver) -> ObservationHandle {
        let id = Uuid::now_v7();
        self.lock().push(Registration {
            id,
            matcher,
            observer: Arc::from(observer),
        });

        let hub = self.clone();
        ObservationHandle::new(id, move || hub.remove(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn observe_noop(hub: &InterceptHub, matcher: PathMatcher) -> ObservationHandle {
        hub.observe(matcher, Box::new(|_| Ok(())))
    }

    #[test]
    fn test_record_without_observers_passes() {
        let hub = InterceptHub::new();
        assert_eq!(hub.record("/api/data", CapturedResponse::new(500)), vec![]);
    }

    #[test]
    fn test_only_matching_observers_run() {
        let hub = InterceptHub::new();
        hub.observe(
            PathMatcher::from("/api/data"),
            Box::new(|exchange| Err(Violation::error_status(exchange.response().status()))),
        );

        assert_eq!(hub.record("/other", CapturedResponse::new(500)), vec![]);
        assert_eq!(
            hub.record("/api/data", CapturedResponse::new(500)),
            vec![Violation::error_status(500)]
        );
    }

    #[test]
    fn test_revoke_ends_exactly_one_observation() {
        let hub = InterceptHub::new();
        let first = observe_noop(&hub, PathMatcher::Any);
        let second = observe_noop(&hub, PathMatcher::Any);
        assert_eq!(hub.active_observations(), 2);

        first.revoke();
        assert_eq!(hub.active_observations(), 1);

        // The second observation is untouched.
        second.revoke();
        assert_eq!(hub.active_observations(), 0);
    }

    #[test]
    fn test_drop_keeps_the_observation_active() {
        let hub = InterceptHub::new();
        drop(observe_noop(&hub, PathMatcher::Any));
        assert_eq!(hub.active_observations(), 1);
    }

    #[test]
    fn test_reset_ends_all_observations() {
        let hub = InterceptHub::new();
        observe_noop(&hub, PathMatcher::Any);
        observe_noop(&hub, PathMatcher::from("/api/data"));
        hub.reset();
        assert_eq!(hub.active_observations(), 0);
    }

    #[test]
    fn test_observers_may_register_during_dispatch() {
        let hub = InterceptHub::new();
        let inner = hub.clone();
        hub.observe(
            PathMatcher::Any,
            Box::new(move |_| {
                inner.observe(PathMatcher::Any, Box::new(|_| Ok(())));
                Ok(())
            }),
        );

        assert_eq!(hub.record("/api/data", CapturedResponse::new(200)), vec![]);
        assert_eq!(hub.active_observations(), 2);
    }
}
