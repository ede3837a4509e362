//! Integration tests for the assertion facade.
//!
//! These tests drive the full `EdgeAssertions` surface through an
//! in-memory hook and a canned fetcher, the way a harness adapter
//! would: register observations, feed completed exchanges through the
//! hook, and check which violations come back.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use edgewatch_application::ports::{
    ExchangeObserver, FetchError, ObservationHandle, ResponseFetcher, TrafficHook,
};
use edgewatch_application::{AssertionError, EdgeAssertions};
use edgewatch_domain::{
    CacheSentinels, CapturedResponse, Exchange, PathMatcher, ProbeRequest, Violation,
};

/// Hook fake: stores registrations and replays exchanges on demand.
#[derive(Clone, Default)]
struct FakeHook {
    observers: Arc<Mutex<Vec<(PathMatcher, ExchangeObserver)>>>,
}

impl TrafficHook for FakeHook {
    fn observe(&self, matcher: PathMatcher, observer: ExchangeObserver) -> ObservationHandle {
        self.observers.lock().unwrap().push((matcher, observer));
        ObservationHandle::detached(Uuid::now_v7())
    }
}

impl FakeHook {
    /// Runs every matching observer against one exchange, collecting
    /// the violations a harness would report.
    fn dispatch(&self, path: &str, response: CapturedResponse) -> Vec<Violation> {
        let exchange = Exchange::new(path, response);
        let observers = self.observers.lock().unwrap();
        observers
            .iter()
            .filter(|(matcher, _)| matcher.matches(path))
            .filter_map(|(_, observer)| observer(&exchange).err())
            .collect()
    }
}

/// Fetcher fake: canned responses keyed by probe path.
#[derive(Clone, Default)]
struct FakeFetcher {
    responses: Arc<Mutex<HashMap<String, CapturedResponse>>>,
    probes: Arc<Mutex<Vec<ProbeRequest>>>,
}

impl FakeFetcher {
    fn stub(self, path: &str, response: CapturedResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), response);
        self
    }

    fn last_probe(&self) -> ProbeRequest {
        self.probes.lock().unwrap().last().cloned().expect("no probe was issued")
    }
}

#[async_trait]
impl ResponseFetcher for FakeFetcher {
    async fn fetch(&self, probe: &ProbeRequest) -> Result<CapturedResponse, FetchError> {
        self.probes.lock().unwrap().push(probe.clone());
        self.responses
            .lock()
            .unwrap()
            .get(probe.path())
            .cloned()
            .ok_or_else(|| FetchError::Connection(format!("no stub for '{}'", probe.path())))
    }
}

fn facade() -> (FakeHook, FakeFetcher, EdgeAssertions<FakeHook, FakeFetcher>) {
    let hook = FakeHook::default();
    let fetcher = FakeFetcher::default();
    let assertions = EdgeAssertions::new(hook.clone(), fetcher.clone());
    (hook, fetcher, assertions)
}

fn redirect_response(status: u16, target: &str) -> CapturedResponse {
    let response = CapturedResponse::new(status)
        .with_header("location", target)
        .with_header("cache-control", "public, max-age=0, must-revalidate");
    if status == 308 {
        response.with_header("refresh", format!("0;url={target}"))
    } else {
        response
    }
}

#[test]
fn test_no_errors_fails_only_matching_error_responses() {
    let (hook, _, assertions) = facade();
    assertions.assert_no_errors("/api/data");

    assert!(hook.dispatch("/api/data", CapturedResponse::new(200)).is_empty());
    assert!(hook.dispatch("/api/data", CapturedResponse::new(399)).is_empty());
    assert!(hook.dispatch("/unwatched", CapturedResponse::new(500)).is_empty());
    assert_eq!(
        hook.dispatch("/api/data", CapturedResponse::new(500)),
        vec![Violation::error_status(500)]
    );
}

#[test]
fn test_no_errors_global_covers_every_path() {
    let (hook, _, assertions) = facade();
    assertions.assert_no_errors_global();

    assert!(hook.dispatch("/", CapturedResponse::new(200)).is_empty());
    assert_eq!(
        hook.dispatch("/any/where?x=1", CapturedResponse::new(404)),
        vec![Violation::error_status(404)]
    );
}

#[test]
fn test_not_cached_and_cached_split_on_the_hit_sentinel() {
    let (hook, _, assertions) = facade();
    assertions.assert_not_cached("/fresh", true);
    assertions.assert_cached("/edge", true);

    let hit = CapturedResponse::new(200).with_header("x-vercel-cache", "HIT");
    let miss = CapturedResponse::new(200).with_header("x-vercel-cache", "MISS");

    assert!(hook.dispatch("/fresh", miss.clone()).is_empty());
    assert_eq!(
        hook.dispatch("/fresh", hit.clone()),
        vec![Violation::unexpectedly_cached("x-vercel-cache", "HIT")]
    );

    assert!(hook.dispatch("/edge", hit).is_empty());
    assert_eq!(
        hook.dispatch("/edge", miss),
        vec![Violation::not_cached("x-vercel-cache", Some("MISS"))]
    );
}

#[test]
fn test_cache_observers_report_error_statuses_first() {
    let (hook, _, assertions) = facade();
    assertions.assert_not_cached("/fresh", true);

    let errored_hit = CapturedResponse::new(502).with_header("x-vercel-cache", "HIT");
    assert_eq!(
        hook.dispatch("/fresh", errored_hit),
        vec![Violation::error_status(502)]
    );
}

#[test]
fn test_cache_observers_can_ignore_error_statuses() {
    let (hook, _, assertions) = facade();
    assertions.assert_not_cached("/fresh", false);
    assertions.assert_cached("/edge", false);

    let errored_miss = CapturedResponse::new(502).with_header("x-vercel-cache", "MISS");
    let errored_hit = CapturedResponse::new(502).with_header("x-vercel-cache", "HIT");

    assert!(hook.dispatch("/fresh", errored_miss).is_empty());
    assert!(hook.dispatch("/edge", errored_hit).is_empty());
}

#[test]
fn test_missing_cache_header_passes_not_cached_and_fails_cached() {
    let (hook, _, assertions) = facade();
    assertions.assert_not_cached("/fresh", true);
    assertions.assert_cached("/edge", true);

    assert!(hook.dispatch("/fresh", CapturedResponse::new(200)).is_empty());
    assert_eq!(
        hook.dispatch("/edge", CapturedResponse::new(200)),
        vec![Violation::not_cached("x-vercel-cache", None)]
    );
}

#[test]
fn test_status_code_assertion_is_exact() {
    let (hook, _, assertions) = facade();
    assertions.assert_status_code("/api/data", 200);

    assert!(hook.dispatch("/api/data", CapturedResponse::new(200)).is_empty());
    assert_eq!(
        hook.dispatch("/api/data", CapturedResponse::new(199)),
        vec![Violation::status_mismatch(200, 199)]
    );
    assert_eq!(
        hook.dispatch("/api/data", CapturedResponse::new(201)),
        vec![Violation::status_mismatch(200, 201)]
    );
}

#[test]
fn test_custom_sentinels_flow_through_the_facade() {
    let hook = FakeHook::default();
    let sentinels = CacheSentinels::default()
        .with_header("x-cache")
        .with_hit("Hit from cloudfront")
        .with_not_hit(["Miss from cloudfront".to_string()]);
    let assertions = EdgeAssertions::with_sentinels(hook.clone(), FakeFetcher::default(), sentinels);
    assertions.assert_cached("/edge", true);

    let hit = CapturedResponse::new(200).with_header("x-cache", "Hit from cloudfront");
    assert!(hook.dispatch("/edge", hit).is_empty());

    let vercel_hit = CapturedResponse::new(200).with_header("x-vercel-cache", "HIT");
    assert_eq!(
        hook.dispatch("/edge", vercel_hit),
        vec![Violation::not_cached("x-cache", None)]
    );
}

#[tokio::test]
async fn test_redirect_assertion_passes_on_a_conforming_response() {
    let (_, fetcher, assertions) = facade();
    let fetcher = fetcher.stub("/old", redirect_response(301, "/new"));

    assertions.assert_redirect("/old", "/new", 301).await.expect("redirect should pass");

    // The probe must capture the 3xx itself.
    let probe = fetcher.last_probe();
    assert_eq!(probe.path(), "/old");
    assert!(!probe.follow_redirects());
}

#[tokio::test]
async fn test_redirect_assertion_rejects_each_broken_check() {
    let (_, fetcher, assertions) = facade();
    let _ = fetcher
        .clone()
        .stub("/wrong-status", redirect_response(302, "/new"))
        .stub("/wrong-target", redirect_response(301, "/other"))
        .stub(
            "/stray-refresh",
            redirect_response(301, "/new").with_header("refresh", "0;url=/new"),
        )
        .stub(
            "/wrong-cache-control",
            CapturedResponse::new(301)
                .with_header("location", "/new")
                .with_header("cache-control", "no-store"),
        );

    for path in [
        "/wrong-status",
        "/wrong-target",
        "/stray-refresh",
        "/wrong-cache-control",
    ] {
        let result = assertions.assert_redirect(path, "/new", 301).await;
        assert!(
            matches!(result, Err(AssertionError::Violation(_))),
            "{path} must fail the redirect assertion"
        );
    }
}

#[tokio::test]
async fn test_permanent_redirect_requires_the_refresh_header() {
    let (_, fetcher, assertions) = facade();
    let _ = fetcher
        .clone()
        .stub("/moved", redirect_response(308, "/new"))
        .stub(
            "/moved-no-refresh",
            CapturedResponse::new(308)
                .with_header("location", "/new")
                .with_header("cache-control", "public, max-age=0, must-revalidate"),
        );

    assertions
        .assert_redirect("/moved", "/new", 308)
        .await
        .expect("308 with refresh should pass");

    let result = assertions.assert_redirect("/moved-no-refresh", "/new", 308).await;
    match result {
        Err(AssertionError::Violation(violation)) => {
            assert_eq!(
                violation,
                Violation::header_mismatch("refresh", "0;url=/new", None)
            );
        }
        other => panic!("expected a refresh violation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_with_headers_sends_the_extra_headers() {
    let (_, fetcher, assertions) = facade();
    let fetcher = fetcher.stub("/old", redirect_response(301, "/new"));

    assertions
        .assert_redirect_with_headers(
            "/old",
            "/new",
            301,
            [("x-feature-flag".to_string(), "on".to_string())],
        )
        .await
        .expect("redirect should pass");

    let probe = fetcher.last_probe();
    assert_eq!(
        probe.headers(),
        [("x-feature-flag".to_string(), "on".to_string())]
    );
    assert!(!probe.follow_redirects());
}

#[tokio::test]
async fn test_redirect_violations_read_like_the_underlying_violation() {
    let (_, fetcher, assertions) = facade();
    let _ = fetcher.clone().stub("/old", redirect_response(404, "/new"));

    let error = assertions.assert_redirect("/old", "/new", 301).await.unwrap_err();
    assert_eq!(error.to_string(), "expected status code 301, got 404");
}

#[tokio::test]
async fn test_redirect_surfaces_fetch_failures() {
    let (_, _, assertions) = facade();

    let result = assertions.assert_redirect("/unreachable", "/new", 301).await;
    assert!(matches!(result, Err(AssertionError::Fetch(_))));
}

#[test]
fn test_captured_response_checks_share_the_facade_sentinels() {
    let (_, _, assertions) = facade();

    let hit = CapturedResponse::new(200).with_header("x-vercel-cache", "HIT");
    let origin = CapturedResponse::new(200)
        .with_header("x-vercel-cache", "LambdaGeneratedResponse from cloudfront");
    let stale = CapturedResponse::new(200).with_header("x-vercel-cache", "STALE");

    assert!(assertions.assert_cache_status(&hit, true).is_ok());
    assert!(assertions.assert_cache_status(&origin, false).is_ok());
    assert!(assertions.assert_cache_status(&stale, false).is_err());
    assert!(assertions.assert_cache_status(&hit, false).is_err());

    let gzip = CapturedResponse::new(200).with_header("content-encoding", "gzip");
    assert!(assertions.assert_compressed(&gzip).is_ok());
    assert!(assertions.assert_compressed(&hit).is_err());
}
