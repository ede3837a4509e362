//! Path matchers for traffic-observing assertions.

use std::fmt;

use regex::Regex;

/// Identifies which outgoing requests an assertion observes.
///
/// No normalization is applied to either side: an `Exact` matcher compares
/// the raw path string, and a `Pattern` matcher runs its regex against the
/// raw path. How a matcher is applied is ultimately up to the interception
/// collaborator; the hub bundled with this workspace uses
/// [`matches`](Self::matches).
#[derive(Debug, Clone)]
pub enum PathMatcher {
    /// Matches one path by string equality.
    Exact(String),
    /// Matches every path the regex matches.
    Pattern(Regex),
    /// Matches every outgoing request.
    Any,
}

impl PathMatcher {
    /// Matcher for exactly the given path.
    #[must_use]
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    /// Matcher for every path the compiled regex matches.
    #[must_use]
    pub const fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    /// Returns true if the matcher selects the given request path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == path,
            Self::Pattern(regex) => regex.is_match(path),
            Self::Any => true,
        }
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(path) => write!(f, "{path}"),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            Self::Any => write!(f, "**"),
        }
    }
}

impl From<&str> for PathMatcher {
    fn from(path: &str) -> Self {
        Self::Exact(path.to_string())
    }
}

impl From<String> for PathMatcher {
    fn from(path: String) -> Self {
        Self::Exact(path)
    }
}

impl From<Regex> for PathMatcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_matching_is_literal() {
        let matcher = PathMatcher::exact("/api/data");
        assert!(matcher.matches("/api/data"));
        assert!(!matcher.matches("/api/data/"));
        assert!(!matcher.matches("/API/data"));
        assert!(!matcher.matches("/api/data?page=1"));
    }

    #[test]
    fn test_pattern_matching() {
        let matcher = PathMatcher::pattern(Regex::new(r"^/blog/.+$").unwrap());
        assert!(matcher.matches("/blog/first-post"));
        assert!(!matcher.matches("/blog/"));
        assert!(!matcher.matches("/docs/intro"));
    }

    #[test]
    fn test_any_matches_everything() {
        assert!(PathMatcher::Any.matches("/"));
        assert!(PathMatcher::Any.matches("/anything/at/all"));
        assert!(PathMatcher::Any.matches(""));
    }

    #[test]
    fn test_conversions() {
        assert!(matches!(PathMatcher::from("/x"), PathMatcher::Exact(_)));
        assert!(matches!(
            PathMatcher::from("/x".to_string()),
            PathMatcher::Exact(_)
        ));
        let regex = Regex::new(r"/\d+").unwrap();
        assert!(matches!(PathMatcher::from(regex), PathMatcher::Pattern(_)));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(PathMatcher::exact("/x").to_string(), "/x");
        assert_eq!(
            PathMatcher::pattern(Regex::new(r"^/x$").unwrap()).to_string(),
            "/^/x$/"
        );
        assert_eq!(PathMatcher::Any.to_string(), "**");
    }
}
