//! Header names and literal values of the edge-network contract.
//!
//! These are the bit-exact strings the assertions check against. Header
//! names are lowercase to match the normalized form in
//! [`CapturedResponse`](crate::response::CapturedResponse).

/// Header the edge network uses to report hit/miss classification.
pub const CACHE_STATUS: &str = "x-vercel-cache";

/// Cache-status sentinel for a response served from the edge cache.
pub const CACHE_HIT: &str = "HIT";

/// Cache-status sentinel for a response the edge looked up but did not have.
pub const CACHE_MISS: &str = "MISS";

/// Cache-status sentinel when the origin function served the request directly.
pub const CACHE_ORIGIN_SERVED: &str = "LambdaGeneratedResponse from cloudfront";

/// Redirect target header.
pub const LOCATION: &str = "location";

/// Legacy-compatibility redirect header, required only on 308 responses.
pub const REFRESH: &str = "refresh";

/// Response caching directives header.
pub const CACHE_CONTROL: &str = "cache-control";

/// Response body encoding header.
pub const CONTENT_ENCODING: &str = "content-encoding";

/// Encoding token for gzip-compressed bodies.
pub const GZIP: &str = "gzip";

/// `cache-control` value every redirect response must carry.
pub const REDIRECT_CACHE_CONTROL: &str = "public, max-age=0, must-revalidate";

/// Status code whose redirects additionally require the `refresh` header.
pub const PERMANENT_REDIRECT: u16 = 308;

/// Formats the `refresh` value required for a 308 redirect to `target`.
#[must_use]
pub fn refresh_value(target: &str) -> String {
    format!("0;url={target}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_refresh_value_format() {
        assert_eq!(refresh_value("/new"), "0;url=/new");
        assert_eq!(refresh_value("/docs?page=2"), "0;url=/docs?page=2");
    }
}
