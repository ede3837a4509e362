//! Traffic hook port
//!
//! Defines the interface for the interception collaborator.

use std::fmt;

use uuid::Uuid;

use edgewatch_domain::{Exchange, Outcome, PathMatcher};

/// Classification callback run once per matching completed exchange.
///
/// Returning an `Err` fails the matched exchange; the collaborator is
/// responsible for surfacing the violation as a test failure.
pub type ExchangeObserver = Box<dyn Fn(&Exchange) -> Outcome + Send + Sync>;

/// Hook trait for registering observers over intercepted traffic.
pub trait TrafficHook: Send + Sync {
    /// Attaches `observer` to every exchange whose path satisfies
    /// `matcher`, from now until the handle is revoked or the hook is
    /// reset.
    ///
    /// Observers attached earlier see each matching exchange before
    /// observers attached later.
    fn observe(&self, matcher: PathMatcher, observer: ExchangeObserver) -> ObservationHandle;
}

/// Handle to one active observation.
///
/// Dropping the handle does nothing: the observation stays active for
/// the rest of the current test, which is the default lifetime. Call
/// [`revoke`](Self::revoke) to end it early.
pub struct ObservationHandle {
    id: Uuid,
    revoke: Option<Box<dyn FnOnce() + Send>>,
}

impl ObservationHandle {
    /// Creates a handle over a revocation callback supplied by the hook.
    #[must_use]
    pub fn new(id: Uuid, revoke: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            revoke: Some(Box::new(revoke)),
        }
    }

    /// Creates a handle with no revocation callback.
    ///
    /// For hooks whose observations can only end with a full reset.
    #[must_use]
    pub const fn detached(id: Uuid) -> Self {
        Self { id, revoke: None }
    }

    /// The unique id of this observation.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Ends this observation: the observer no longer sees new exchanges.
    ///
    /// Exchanges already dispatched are unaffected. Revoking a detached
    /// handle does nothing.
    pub fn revoke(mut self) {
        if let Some(revoke) = self.revoke.take() {
            revoke();
        }
    }
}

impl fmt::Debug for ObservationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
