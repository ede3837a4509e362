//! Fetcher configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the reqwest-backed probe fetcher.
///
/// Loaded from the harness's own configuration (deserializable) or built
/// in code. Only `base_url` is usually set per suite, the rest default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL that relative probe paths are resolved against.
    pub base_url: String,

    /// Per-probe deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every probe.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    /// Creates a configuration for the deployment under test, with
    /// default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    concat!("edgewatch/", env!("CARGO_PKG_VERSION")).to_string()
}
