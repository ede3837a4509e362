//! Edgewatch Application - Assertion orchestration
//!
//! This crate defines the collaborator ports (traffic interception and
//! direct fetching) and the [`EdgeAssertions`] facade that test suites
//! call. All orchestration is port-shaped: adapters live in the
//! infrastructure crate.

pub mod assertions;
pub mod error;
pub mod ports;

pub use assertions::EdgeAssertions;
pub use error::{AssertionError, AssertionResult};
pub use ports::{ExchangeObserver, FetchError, ObservationHandle, ResponseFetcher, TrafficHook};
