//! Probe fetcher implementation using reqwest.
//!
//! This adapter implements the `ResponseFetcher` port using the reqwest
//! library. reqwest fixes the redirect policy when the client is built,
//! so the adapter keeps two clients: one that follows redirects and one
//! that captures the 3xx response as-is for redirect assertions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use edgewatch_application::ports::{FetchError, ResponseFetcher};
use edgewatch_domain::{CapturedResponse, ProbeRequest};

use crate::config::FetcherConfig;

/// Probe fetcher backed by `reqwest::Client`.
pub struct ReqwestFetcher {
    following: Client,
    direct: Client,
    base_url: Url,
    timeout_ms: u64,
}

impl ReqwestFetcher {
    /// Creates a fetcher for the deployment named by `config.base_url`.
    ///
    /// Probes resolve on every status code; a 3xx/4xx/5xx response is
    /// captured, not treated as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or a client
    /// cannot be built.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{e}: {}", config.base_url)))?;

        let following = Self::build_client(config, reqwest::redirect::Policy::limited(10))?;
        let direct = Self::build_client(config, reqwest::redirect::Policy::none())?;

        Ok(Self {
            following,
            direct,
            base_url,
            timeout_ms: config.timeout_ms,
        })
    }

    fn build_client(
        config: &FetcherConfig,
        redirect: reqwest::redirect::Policy,
    ) -> Result<Client, FetchError> {
        Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .build()
            .map_err(|e| FetchError::Other(e.to_string()))
    }

    /// Resolves a probe path against the configured base URL.
    ///
    /// Absolute URLs pass through untouched so suites can probe across
    /// deployments.
    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| FetchError::InvalidUrl(format!("{e}: {path}")));
        }
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{e}: {path}")))
    }

    /// Maps reqwest errors to the port's `FetchError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return FetchError::Connection(error.to_string());
        }
        FetchError::Other(error.to_string())
    }
}

#[async_trait]
impl ResponseFetcher for ReqwestFetcher {
    async fn fetch(&self, probe: &ProbeRequest) -> Result<CapturedResponse, FetchError> {
        let url = self.resolve(probe.path())?;
        let client = if probe.follow_redirects() {
            &self.following
        } else {
            &self.direct
        };

        let mut builder = client
            .get(url)
            .timeout(Duration::from_millis(self.timeout_ms));
        for (name, value) in probe.headers() {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(CapturedResponse::from_parts(status, headers, body))
    }
}
