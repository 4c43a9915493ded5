//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request method (exact, case-sensitive)
//! - Match the request path against a pattern (exact segments, `{name}` captures)
//! - Hand path captures to the route, which ANDs them with the method check
//!
//! # Design Decisions
//! - Method matching is case-sensitive: `get` never matches `GET`
//! - Path matching is case-sensitive, trailing slashes are significant
//! - Query and fragment never take part in path matching
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use http::{Method, Request};

use crate::http::request::normalize_path;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Bytes>) -> bool;
}

/// Matches the request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Bytes>) -> bool {
        req.method().as_str() == self.method.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A registered path: static segments plus `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern. A missing leading slash is added.
    pub fn parse(pattern: &str) -> Self {
        let raw = normalize_path(pattern);
        let segments = raw
            .split('/')
            .skip(1)
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Static(segment.to_string()),
                }
            })
            .collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a request path, returning captured parameters on success.
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let path = normalize_path(path);
        let mut parts = path.split('/').skip(1);
        let mut params = PathParams::default();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.0.insert(name.clone(), part.to_string());
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Values captured by `{name}` segments, stored in request extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Matches the request path against a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    pattern: PathPattern,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
        }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Path parameters when the request path fits the pattern.
    pub fn captures(&self, req: &Request<Bytes>) -> Option<PathParams> {
        self.pattern.captures(req.uri().path())
    }
}
