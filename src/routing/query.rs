//! Query-string parsing for conditional routes.
//!
//! # Responsibilities
//! - Decode `application/x-www-form-urlencoded` query strings
//! - Expand bracketed keys (`filters[hasContent]=1`) into nested maps
//! - Compare a request's parameters against a required set
//!
//! # Design Decisions
//! - Values are strings, compared exactly (no coercion, no prefix match)
//! - Nested maps compare as whole values
//! - Later scalar assignments replace earlier ones
//! - `key[]` appends under the next numeric index

use std::collections::BTreeMap;

use http::Uri;
use url::form_urlencoded;

/// A single parameter value: a string or a nested map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Value(String),
    Map(QueryParams),
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Value(value) => Some(value),
            QueryValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&QueryParams> {
        match self {
            QueryValue::Map(map) => Some(map),
            QueryValue::Value(_) => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Value(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Value(value)
    }
}

impl From<QueryParams> for QueryValue {
    fn from(value: QueryParams) -> Self {
        QueryValue::Map(value)
    }
}

/// Parsed query parameters. Ordering of keys is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, QueryValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if let Some((base, segments)) = split_key(&name) {
                assign(&mut params.entries, base, &segments, value.into_owned());
            }
        }
        params
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::parse(uri.query().unwrap_or_default())
    }

    /// Builder-style insert, replacing any previous value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.entries.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(QueryValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// True when every required key is present with an equal value.
    pub fn contains_all(&self, required: &QueryParams) -> bool {
        required
            .entries
            .iter()
            .all(|(name, value)| self.entries.get(name) == Some(value))
    }

    /// Next list index, or `None` once the largest index is `u64::MAX`.
    fn next_index(&self) -> Option<String> {
        let next = match self.entries.keys().filter_map(|key| key.parse::<u64>().ok()).max() {
            Some(max) => max.checked_add(1)?,
            None => 0,
        };
        Some(next.to_string())
    }
}

/// Splits `a[b][]` into `("a", ["b", ""])`, the way PHP's `parse_str` reads names.
///
/// Leading spaces are dropped and `.` or ` ` in the base name become `_`.
/// An unterminated first bracket becomes `_` and the rest stays literal;
/// anything after the last complete bracket pair is ignored.
fn split_key(name: &str) -> Option<(String, Vec<&str>)> {
    let name = name.trim_start_matches(' ');
    let (base, brackets) = match name.find('[') {
        Some(open) => (&name[..open], Some(&name[open..])),
        None => (name, None),
    };
    if base.is_empty() {
        return None;
    }
    let base = base.replace(['.', ' '], "_");

    let Some(mut rest) = brackets else {
        return Some((base, Vec::new()));
    };
    let mut segments = Vec::new();
    while let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(close) => {
                segments.push(&inner[..close]);
                rest = &inner[close + 1..];
            }
            None if segments.is_empty() => return Some((format!("{}_{}", base, inner), Vec::new())),
            None => break,
        }
    }
    Some((base, segments))
}

fn assign(entries: &mut BTreeMap<String, QueryValue>, key: String, segments: &[&str], value: String) {
    let Some((next, rest)) = segments.split_first() else {
        entries.insert(key, QueryValue::Value(value));
        return;
    };

    let slot = entries
        .entry(key)
        .or_insert_with(|| QueryValue::Map(QueryParams::new()));
    if !matches!(slot, QueryValue::Map(_)) {
        *slot = QueryValue::Map(QueryParams::new());
    }
    if let QueryValue::Map(child) = slot {
        let child_key = if next.is_empty() {
            child.next_index()
        } else {
            Some(next.to_string())
        };
        if let Some(child_key) = child_key {
            assign(&mut child.entries, child_key, rest, value);
        }
    }
}
