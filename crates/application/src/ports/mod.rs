//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the assertion core and the test
//! collaborator. Each port is a trait that can be implemented by adapters
//! in the infrastructure layer.

mod fetcher;
mod traffic_hook;

pub use fetcher::{FetchError, ResponseFetcher};
pub use traffic_hook::{ExchangeObserver, ObservationHandle, TrafficHook};
