//! Edgewatch Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: a reqwest-backed probe fetcher and
//! an in-process interception hub for harnesses that route traffic
//! through the test process.

pub mod adapters;
pub mod config;
pub mod intercept;

pub use adapters::ReqwestFetcher;
pub use config::FetcherConfig;
pub use intercept::InterceptHub;
