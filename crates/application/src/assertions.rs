//! Edge assertion surface.
//!
//! [`EdgeAssertions`] is the one entry point test suites bind to. It is
//! generic over the two collaborator ports: a [`TrafficHook`] that
//! intercepts exchanges, and a [`ResponseFetcher`] that issues probe
//! requests. The facade composes closures out of the pure
//! [`classify`](edgewatch_domain::classify) rules and hands them to the
//! hook; it owns no state beyond the configured cache sentinels.

use edgewatch_domain::{
    CacheSentinels, CapturedResponse, Outcome, PathMatcher, ProbeRequest, classify,
};

use crate::error::AssertionResult;
use crate::ports::{ObservationHandle, ResponseFetcher, TrafficHook};

/// Assertion facade over the interception and fetch collaborators.
pub struct EdgeAssertions<H: TrafficHook, F: ResponseFetcher> {
    hook: H,
    fetcher: F,
    sentinels: CacheSentinels,
}

impl<H: TrafficHook, F: ResponseFetcher> EdgeAssertions<H, F> {
    /// Creates a facade with the default cache sentinels.
    #[must_use]
    pub fn new(hook: H, fetcher: F) -> Self {
        Self::with_sentinels(hook, fetcher, CacheSentinels::default())
    }

    /// Creates a facade with sentinels matched to the edge network under
    /// test.
    #[must_use]
    pub const fn with_sentinels(hook: H, fetcher: F, sentinels: CacheSentinels) -> Self {
        Self {
            hook,
            fetcher,
            sentinels,
        }
    }

    /// The sentinels every cache assertion consults.
    #[must_use]
    pub const fn sentinels(&self) -> &CacheSentinels {
        &self.sentinels
    }

    /// Fails any matching exchange whose status is an error (>= 400).
    ///
    /// The observation stays active for the rest of the test unless the
    /// returned handle is revoked.
    pub fn assert_no_errors(&self, matcher: impl Into<PathMatcher>) -> ObservationHandle {
        self.hook.observe(
            matcher.into(),
            Box::new(|exchange| classify::error_free(exchange.response())),
        )
    }

    /// Fails every exchange whose status is an error, on any path.
    pub fn assert_no_errors_global(&self) -> ObservationHandle {
        self.assert_no_errors(PathMatcher::Any)
    }

    /// Fails any matching exchange served from the edge cache.
    ///
    /// With `fail_on_http_error`, an error status fails the exchange
    /// before the cache header is consulted.
    pub fn assert_not_cached(
        &self,
        matcher: impl Into<PathMatcher>,
        fail_on_http_error: bool,
    ) -> ObservationHandle {
        let sentinels = self.sentinels.clone();
        self.hook.observe(
            matcher.into(),
            Box::new(move |exchange| {
                let response = exchange.response();
                if fail_on_http_error {
                    classify::error_free(response)?;
                }
                classify::not_cached(response, &sentinels)
            }),
        )
    }

    /// Fails any matching exchange not served from the edge cache.
    ///
    /// With `fail_on_http_error`, an error status fails the exchange
    /// before the cache header is consulted.
    pub fn assert_cached(
        &self,
        matcher: impl Into<PathMatcher>,
        fail_on_http_error: bool,
    ) -> ObservationHandle {
        let sentinels = self.sentinels.clone();
        self.hook.observe(
            matcher.into(),
            Box::new(move |exchange| {
                let response = exchange.response();
                if fail_on_http_error {
                    classify::error_free(response)?;
                }
                classify::cached(response, &sentinels)
            }),
        )
    }

    /// Fails any matching exchange whose status differs from `expected`.
    ///
    /// Exact match: an expectation of 200 fails for both 199 and 201.
    pub fn assert_status_code(
        &self,
        matcher: impl Into<PathMatcher>,
        expected: u16,
    ) -> ObservationHandle {
        self.hook.observe(
            matcher.into(),
            Box::new(move |exchange| classify::status(exchange.response(), expected)),
        )
    }

    /// Probes `path` without following redirects and checks the full
    /// redirect contract: status, `location`, the 308 `refresh`
    /// compatibility header, and `cache-control`.
    ///
    /// # Errors
    /// The first violated check, or the fetch failure if no response
    /// could be captured.
    pub async fn assert_redirect(
        &self,
        path: &str,
        expected_target: &str,
        expected_status: u16,
    ) -> AssertionResult<()> {
        let probe = ProbeRequest::new(path).without_redirects();
        self.probe_redirect(probe, expected_target, expected_status)
            .await
    }

    /// Like [`assert_redirect`](Self::assert_redirect), sending extra
    /// request headers with the probe.
    ///
    /// # Errors
    /// The first violated check, or the fetch failure if no response
    /// could be captured.
    pub async fn assert_redirect_with_headers(
        &self,
        path: &str,
        expected_target: &str,
        expected_status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
    ) -> AssertionResult<()> {
        let probe = ProbeRequest::new(path)
            .without_redirects()
            .with_headers(headers);
        self.probe_redirect(probe, expected_target, expected_status)
            .await
    }

    async fn probe_redirect(
        &self,
        probe: ProbeRequest,
        expected_target: &str,
        expected_status: u16,
    ) -> AssertionResult<()> {
        let response = self.fetcher.fetch(&probe).await?;
        classify::redirect(&response, expected_target, expected_status)?;
        Ok(())
    }

    /// Checks the cache-status header of an already-captured response:
    /// the hit sentinel when `should_be_cached`, one of the accepted
    /// "not hit" sentinels otherwise.
    ///
    /// # Errors
    /// [`Violation`](edgewatch_domain::Violation) describing the
    /// observed header.
    pub fn assert_cache_status(
        &self,
        response: &CapturedResponse,
        should_be_cached: bool,
    ) -> Outcome {
        classify::cache_status(response, should_be_cached, &self.sentinels)
    }

    /// Checks that an already-captured response was gzip-compressed.
    ///
    /// # Errors
    /// [`Violation`](edgewatch_domain::Violation) describing the
    /// observed `content-encoding`.
    #[allow(clippy::unused_self)]
    pub fn assert_compressed(&self, response: &CapturedResponse) -> Outcome {
        classify::compressed(response)
    }
}
