//! Captured HTTP response snapshot.
//!
//! The assertions only ever read the status code and headers of a
//! response; the body is carried so a harness can replay full captures
//! but is otherwise unused.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A completed HTTP response as seen by the assertion layer.
///
/// Header keys are case-normalized to lowercase at construction, and
/// [`header`](Self::header) looks them up case-insensitively so captures
/// deserialized from external fixtures behave the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedResponse {
    /// HTTP status code.
    status: u16,
    /// Response headers, keyed by lowercase name.
    #[serde(default)]
    headers: HashMap<String, String>,
    /// Response body. Unused by the assertions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    body: Vec<u8>,
}

impl CapturedResponse {
    /// Creates a response with the given status and no headers.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a response from raw parts, normalizing header keys.
    #[must_use]
    pub fn from_parts(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: Vec<u8>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Adds a header, normalizing its name to lowercase.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the status code is an error (>= 400).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the header map (lowercase keys).
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
