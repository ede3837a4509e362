//! Response classification.
//!
//! Each function checks one captured response against one invariant and
//! returns a pass/fail [`Outcome`]. Classification is deliberately free of
//! side effects: the interception layer wraps these functions in observers
//! and leaves the raise-to-fail step to the collaborator, so every rule
//! here is unit-testable without a live harness.

use crate::cache::CacheSentinels;
use crate::error::{Outcome, Violation};
use crate::headers;
use crate::response::CapturedResponse;

/// Passes unless the response status is an error (>= 400).
///
/// # Errors
/// [`Violation::ErrorStatus`] carrying the observed status.
pub fn error_free(response: &CapturedResponse) -> Outcome {
    if response.is_error() {
        return Err(Violation::error_status(response.status()));
    }
    Ok(())
}

/// Passes iff the response status equals `expected` exactly.
///
/// This is an exact match, not a range: 199 and 201 both fail an
/// expectation of 200.
///
/// # Errors
/// [`Violation::StatusMismatch`] reporting both values.
pub fn status(response: &CapturedResponse, expected: u16) -> Outcome {
    let actual = response.status();
    if actual != expected {
        return Err(Violation::status_mismatch(expected, actual));
    }
    Ok(())
}

/// Passes unless the cache-status header carries the hit sentinel.
///
/// Any other value, or an absent header, passes.
///
/// # Errors
/// [`Violation::UnexpectedlyCached`].
pub fn not_cached(response: &CapturedResponse, sentinels: &CacheSentinels) -> Outcome {
    if let Some(value) = response.header(sentinels.header()) {
        if sentinels.is_hit(value) {
            return Err(Violation::unexpectedly_cached(sentinels.header(), value));
        }
    }
    Ok(())
}

/// Passes iff the cache-status header carries the hit sentinel.
///
/// Any other value, or an absent header, fails.
///
/// # Errors
/// [`Violation::NotCached`] carrying the observed value.
pub fn cached(response: &CapturedResponse, sentinels: &CacheSentinels) -> Outcome {
    let observed = response.header(sentinels.header());
    match observed {
        Some(value) if sentinels.is_hit(value) => Ok(()),
        _ => Err(Violation::not_cached(sentinels.header(), observed)),
    }
}

/// Checks the cache-status header of an already-captured response.
///
/// When `should_be_cached`, this is [`cached`]. Otherwise the header must
/// be a member of the accepted "not hit" sentinel set; the hit sentinel,
/// any unlisted value, and an absent header all fail.
///
/// # Errors
/// [`Violation::NotCached`] or [`Violation::CacheStatusMismatch`].
pub fn cache_status(
    response: &CapturedResponse,
    should_be_cached: bool,
    sentinels: &CacheSentinels,
) -> Outcome {
    if should_be_cached {
        return cached(response, sentinels);
    }
    let observed = response.header(sentinels.header());
    match observed {
        Some(value) if sentinels.accepts_uncached(value) => Ok(()),
        _ => Err(Violation::cache_status_mismatch(
            sentinels.header(),
            sentinels.not_hit(),
            observed,
        )),
    }
}

/// Passes iff `content-encoding` equals the gzip token exactly.
///
/// # Errors
/// [`Violation::HeaderMismatch`]; an absent header is a mismatch.
pub fn compressed(response: &CapturedResponse) -> Outcome {
    expect_header(response, headers::CONTENT_ENCODING, headers::GZIP)
}

/// Checks a redirect response against the full redirect contract.
///
/// Four checks run in declaration order, first failure aborts:
/// status equals `expected_status`; `location` equals `expected_target`
/// exactly (no normalization of trailing slashes, query strings, or case);
/// for a 308 the `refresh` header equals `0;url=<target>`, for any other
/// status it must be absent; `cache-control` equals
/// `public, max-age=0, must-revalidate` exactly.
///
/// # Errors
/// The violation of the first failing check.
pub fn redirect(
    response: &CapturedResponse,
    expected_target: &str,
    expected_status: u16,
) -> Outcome {
    status(response, expected_status)?;
    expect_header(response, headers::LOCATION, expected_target)?;

    if expected_status == headers::PERMANENT_REDIRECT {
        expect_header(
            response,
            headers::REFRESH,
            &headers::refresh_value(expected_target),
        )?;
    } else if let Some(value) = response.header(headers::REFRESH) {
        return Err(Violation::unexpected_header(headers::REFRESH, value));
    }

    expect_header(
        response,
        headers::CACHE_CONTROL,
        headers::REDIRECT_CACHE_CONTROL,
    )
}

fn expect_header(response: &CapturedResponse, name: &str, expected: &str) -> Outcome {
    let observed = response.header(name);
    if observed == Some(expected) {
        return Ok(());
    }
    Err(Violation::header_mismatch(name, expected, observed))
}
