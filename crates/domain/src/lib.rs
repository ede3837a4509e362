//! Edgewatch Domain - Core assertion types
//!
//! This crate defines the domain model for the Edgewatch assertion
//! library: captured responses, cache sentinels, path matchers, and the
//! pure classification rules that decide pass or fail. All types here
//! are pure Rust with no I/O dependencies.

pub mod cache;
pub mod classify;
pub mod error;
pub mod exchange;
pub mod headers;
pub mod matcher;
pub mod probe;
pub mod response;

pub use cache::CacheSentinels;
pub use error::{Outcome, Violation};
pub use exchange::Exchange;
pub use matcher::PathMatcher;
pub use probe::ProbeRequest;
pub use response::CapturedResponse;
