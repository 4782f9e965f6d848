//! Scope matching logic.
//!
//! # Responsibilities
//! - Match host (exact match, case-insensitive, port ignored)
//! - Match location path (segment-aware prefix, case-sensitive)
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec)
//! - Path matching is case-sensitive
//! - `/api` covers `/api` and `/api/...` but never `/apix`
//! - No regex to guarantee O(n) matching

use axum::http::{header, Request};

/// The request attributes scope resolution looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub host: Option<&'a str>,
    pub path: &'a str,
}

impl<'a> Target<'a> {
    pub fn new(host: Option<&'a str>, path: &'a str) -> Self {
        Self { host, path }
    }

    /// Extract host and path from a request.
    ///
    /// The `Host` header wins over the URI authority.
    pub fn from_request<B>(req: &'a Request<B>) -> Self {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| req.uri().host());
        Self {
            host,
            path: req.uri().path(),
        }
    }
}

/// Trait for matching requests against scope conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the target falls under this condition.
    fn matches(&self, target: &Target<'_>) -> bool;
}

/// Matches the request host against a server name or one of its aliases.
#[derive(Debug, Clone)]
pub struct HostMatcher {
    names: Vec<String>,
}

impl HostMatcher {
    /// Create a new host matcher.
    /// Names are normalized to lowercase for case-insensitive matching.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Matcher for HostMatcher {
    fn matches(&self, target: &Target<'_>) -> bool {
        target
            .host
            .map(strip_port)
            .map(|h| self.names.iter().any(|n| n.eq_ignore_ascii_case(h)))
            .unwrap_or(false)
    }
}

/// Matches the request path against a location prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True if `path` lies under this prefix on a segment boundary.
    pub fn covers(&self, path: &str) -> bool {
        is_segment_prefix(&self.prefix, path)
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, target: &Target<'_>) -> bool {
        self.covers(target.path)
    }
}

/// Segment-aware prefix test.
pub fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    if !path.starts_with(prefix) {
        return false;
    }
    prefix.ends_with('/')
        || path.len() == prefix.len()
        || path.as_bytes()[prefix.len()] == b'/'
}

/// Drop a trailing `:port`, leaving bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => &host[..end + 2],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_host_matcher() {
        let matcher = HostMatcher::new(["example.com", "www.example.com"]);

        assert!(matcher.matches(&Target::new(Some("example.com"), "/")));
        assert!(matcher.matches(&Target::new(Some("EXAMPLE.COM"), "/"))); // Case insensitive
        assert!(matcher.matches(&Target::new(Some("www.example.com:8080"), "/")));
        assert!(!matcher.matches(&Target::new(Some("other.com"), "/")));
        assert!(!matcher.matches(&Target::new(None, "/")));
    }

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches(&Target::new(None, "/api")));
        assert!(matcher.matches(&Target::new(None, "/api/")));
        assert!(matcher.matches(&Target::new(None, "/api/v1")));
        assert!(!matcher.matches(&Target::new(None, "/apix")));
        assert!(!matcher.matches(&Target::new(None, "/images")));

        let root = PathPrefixMatcher::new("/");
        assert!(root.covers("/"));
        assert!(root.covers("/anything/at/all"));

        let trailing = PathPrefixMatcher::new("/api/");
        assert!(trailing.covers("/api/v1"));
        assert!(!trailing.covers("/api"));
    }

    #[test]
    fn test_target_from_request() {
        let req = Request::builder()
            .uri("http://ignored.example/api/v1?x=1")
            .header("Host", "api.example.com")
            .body(Body::default())
            .unwrap();
        let target = Target::from_request(&req);
        assert_eq!(target.host, Some("api.example.com"));
        assert_eq!(target.path, "/api/v1");

        let req = Request::builder()
            .uri("http://authority.example/")
            .body(Body::default())
            .unwrap();
        assert_eq!(Target::from_request(&req).host, Some("authority.example"));
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:443"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }
}
