//! Intercepted request/response exchange.

use serde::{Deserialize, Serialize};

use crate::response::CapturedResponse;

/// A completed HTTP exchange observed by the interception collaborator.
///
/// Carries the request path the matcher was applied to and the final
/// response. Exchanges are ephemeral: an observer sees each matching
/// exchange exactly once and only reads from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Path of the outgoing request.
    path: String,
    /// Final response for that request.
    response: CapturedResponse,
}

impl Exchange {
    /// Creates an exchange from a request path and its final response.
    #[must_use]
    pub fn new(path: impl Into<String>, response: CapturedResponse) -> Self {
        Self {
            path: path.into(),
            response,
        }
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the final response.
    #[must_use]
    pub const fn response(&self) -> &CapturedResponse {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exchange_accessors() {
        let exchange = Exchange::new("/api/data", CapturedResponse::new(200));
        assert_eq!(exchange.path(), "/api/data");
        assert_eq!(exchange.response().status(), 200);
    }
}
