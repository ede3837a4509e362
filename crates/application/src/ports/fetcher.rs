//! Response fetcher port
//!
//! Defines the interface for the direct HTTP client collaborator.

use async_trait::async_trait;

use edgewatch_domain::{CapturedResponse, ProbeRequest};

/// Errors that can occur while executing a probe request.
///
/// These are transport failures only: a 3xx/4xx/5xx response is a
/// successful fetch and is returned as a [`CapturedResponse`] for the
/// classification layer to judge.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The probe path could not be resolved into a request URL.
    #[error("invalid probe URL '{0}'")]
    InvalidUrl(String),

    /// The request did not complete within the configured deadline.
    #[error("probe timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline that elapsed.
        timeout_ms: u64,
    },

    /// The connection failed before any response arrived.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Client trait for issuing probe requests.
#[async_trait]
pub trait ResponseFetcher: Send + Sync {
    /// Executes `probe` and captures the final status, headers, and body
    /// of the response.
    ///
    /// Implementations must resolve on any status code without treating
    /// error statuses as failures, and must not follow redirects when
    /// `probe.follow_redirects()` is false: redirect assertions inspect
    /// the 3xx response itself.
    ///
    /// # Errors
    /// Returns [`FetchError`] when no response could be captured.
    async fn fetch(&self, probe: &ProbeRequest) -> Result<CapturedResponse, FetchError>;
}
