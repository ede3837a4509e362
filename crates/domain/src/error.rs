//! Assertion violation types.

use thiserror::Error;

/// A violated response invariant.
///
/// This is the only failure kind the assertion layer produces. Every
/// variant names the invariant that did not hold and carries the observed
/// value so the test failure is debuggable on its own. Violations are
/// always fatal to the current test and are never caught internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The response carried an error status (>= 400) where none was expected.
    #[error("response errored with status {status}")]
    ErrorStatus {
        /// Observed status code.
        status: u16,
    },

    /// The response status did not equal the expected status.
    #[error("expected status code {expected}, got {actual}")]
    StatusMismatch {
        /// Expected status code.
        expected: u16,
        /// Observed status code.
        actual: u16,
    },

    /// The response was served from the edge cache where a miss was expected.
    #[error("response was unexpectedly served from the edge cache ({header}: '{value}')")]
    UnexpectedlyCached {
        /// Cache-status header name.
        header: String,
        /// Observed hit sentinel.
        value: String,
    },

    /// The response was not served from the edge cache where a hit was expected.
    #[error("response was not served from the edge cache ({header}: {observed})")]
    NotCached {
        /// Cache-status header name.
        header: String,
        /// Observed header value, quoted, or `missing`.
        observed: String,
    },

    /// The cache-status header was outside the accepted sentinel set.
    #[error("expected {header} to be one of [{accepted}], got {observed}")]
    CacheStatusMismatch {
        /// Cache-status header name.
        header: String,
        /// Accepted sentinel values, quoted and comma-separated.
        accepted: String,
        /// Observed header value, quoted, or `missing`.
        observed: String,
    },

    /// A header did not equal its expected value (or was missing).
    #[error("expected header '{name}' to equal '{expected}', got {observed}")]
    HeaderMismatch {
        /// Header name.
        name: String,
        /// Expected header value.
        expected: String,
        /// Observed header value, quoted, or `missing`.
        observed: String,
    },

    /// A header was present where the contract requires its absence.
    #[error("expected header '{name}' to be absent, got '{value}'")]
    UnexpectedHeader {
        /// Header name.
        name: String,
        /// Observed header value.
        value: String,
    },
}

impl Violation {
    /// Violation for an error status where none was expected.
    #[must_use]
    pub const fn error_status(status: u16) -> Self {
        Self::ErrorStatus { status }
    }

    /// Violation for a status that differs from the expected one.
    #[must_use]
    pub const fn status_mismatch(expected: u16, actual: u16) -> Self {
        Self::StatusMismatch { expected, actual }
    }

    /// Violation for a cache hit where a miss was expected.
    #[must_use]
    pub fn unexpectedly_cached(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnexpectedlyCached {
            header: header.into(),
            value: value.into(),
        }
    }

    /// Violation for a cache miss (or absent header) where a hit was expected.
    #[must_use]
    pub fn not_cached(header: impl Into<String>, observed: Option<&str>) -> Self {
        Self::NotCached {
            header: header.into(),
            observed: quote_or_missing(observed),
        }
    }

    /// Violation for a cache-status value outside the accepted sentinel set.
    #[must_use]
    pub fn cache_status_mismatch(
        header: impl Into<String>,
        accepted: &[String],
        observed: Option<&str>,
    ) -> Self {
        let accepted = accepted
            .iter()
            .map(|value| format!("'{value}'"))
            .collect::<Vec<_>>()
            .join(", ");
        Self::CacheStatusMismatch {
            header: header.into(),
            accepted,
            observed: quote_or_missing(observed),
        }
    }

    /// Violation for a header that differs from its expected value.
    ///
    /// A missing header is reported as a mismatch with an observed value of
    /// `missing`, not as a separate failure kind.
    #[must_use]
    pub fn header_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        observed: Option<&str>,
    ) -> Self {
        Self::HeaderMismatch {
            name: name.into(),
            expected: expected.into(),
            observed: quote_or_missing(observed),
        }
    }

    /// Violation for a header that must be absent but was observed.
    #[must_use]
    pub fn unexpected_header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnexpectedHeader {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of classifying one response: pass, or fail with the violation.
pub type Outcome = Result<(), Violation>;

fn quote_or_missing(value: Option<&str>) -> String {
    value.map_or_else(|| "missing".to_string(), |value| format!("'{value}'"))
}
