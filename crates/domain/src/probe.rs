//! One-shot request options for direct-request assertions.

use serde::{Deserialize, Serialize};

/// Options for a single GET request issued by a direct-request assertion.
///
/// The target may be a path (resolved against the fetcher's base URL) or
/// an absolute URL. Redirect-following is on by default and disabled for
/// redirect assertions, which must observe the 3xx response itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRequest {
    /// Target path or absolute URL.
    path: String,
    /// Extra request headers, in insertion order.
    #[serde(default)]
    headers: Vec<(String, String)>,
    /// Whether the client may follow redirects for this request.
    #[serde(default = "default_follow")]
    follow_redirects: bool,
}

impl ProbeRequest {
    /// Creates a request for the given path with redirect-following enabled.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: Vec::new(),
            follow_redirects: true,
        }
    }

    /// Disables redirect-following for this request.
    #[must_use]
    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds several request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Returns the target path or absolute URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the extra request headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns whether the client may follow redirects.
    #[must_use]
    pub const fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }
}

const fn default_follow() -> bool {
    true
}
