//! Application error types

use thiserror::Error;

use edgewatch_domain::Violation;

use crate::ports::FetchError;

/// Application-level errors.
///
/// Probe assertions have two ways to fail: the response violated the
/// asserted invariant, or the probe itself never produced a response.
/// Violations pass through untouched so the harness reports the same
/// message an intercepted exchange would have produced.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The captured response violated the asserted invariant.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// The probe request could not be completed.
    #[error("probe failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Result type alias for probe assertions.
pub type AssertionResult<T> = Result<T, AssertionError>;
