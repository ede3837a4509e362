//! Cache-status sentinel configuration.

use serde::{Deserialize, Serialize};

use crate::headers;

/// The cache-status header contract of the edge network.
///
/// Which header reports hit/miss classification and which values it may
/// carry is an operational detail of the CDN vendor, so it is
/// configuration rather than a hardcoded literal. The default matches the
/// deployment this library was written against: `x-vercel-cache` with
/// `HIT` for a cache hit and two accepted "not hit" sentinels, because
/// the edge reports a different value when the origin serves the request
/// directly.
///
/// Values compare by exact string equality, case included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSentinels {
    /// Header carrying the cache-status sentinel.
    #[serde(default = "default_header")]
    header: String,
    /// Sentinel reported for a cache hit.
    #[serde(default = "default_hit")]
    hit: String,
    /// Accepted sentinels for a response that was not a cache hit.
    #[serde(default = "default_not_hit")]
    not_hit: Vec<String>,
}

impl CacheSentinels {
    /// Overrides the cache-status header name.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Overrides the hit sentinel.
    #[must_use]
    pub fn with_hit(mut self, hit: impl Into<String>) -> Self {
        self.hit = hit.into();
        self
    }

    /// Overrides the accepted "not hit" sentinel set.
    #[must_use]
    pub fn with_not_hit(mut self, not_hit: impl IntoIterator<Item = String>) -> Self {
        self.not_hit = not_hit.into_iter().collect();
        self
    }

    /// Returns the cache-status header name.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the hit sentinel.
    #[must_use]
    pub fn hit(&self) -> &str {
        &self.hit
    }

    /// Returns the accepted "not hit" sentinels.
    #[must_use]
    pub fn not_hit(&self) -> &[String] {
        &self.not_hit
    }

    /// Returns true if the value is the hit sentinel.
    #[must_use]
    pub fn is_hit(&self, value: &str) -> bool {
        self.hit == value
    }

    /// Returns true if the value is an accepted "not hit" sentinel.
    #[must_use]
    pub fn accepts_uncached(&self, value: &str) -> bool {
        self.not_hit.iter().any(|sentinel| sentinel == value)
    }
}

impl Default for CacheSentinels {
    fn default() -> Self {
        Self {
            header: default_header(),
            hit: default_hit(),
            not_hit: default_not_hit(),
        }
    }
}

fn default_header() -> String {
    headers::CACHE_STATUS.to_string()
}

fn default_hit() -> String {
    headers::CACHE_HIT.to_string()
}

fn default_not_hit() -> Vec<String> {
    vec![
        headers::CACHE_MISS.to_string(),
        headers::CACHE_ORIGIN_SERVED.to_string(),
    ]
}
