//! Query string snapshot
//!
//! A request query is a list of `key=value` pairs where a key may repeat.
//! [`QueryParams`] keeps the keys in arrival order and folds repeated keys
//! into [`QueryValue::Multiple`], so the normalizers can read and rewrite
//! individual parameters without disturbing the rest of the query.

use axum::http::request::Parts;
use axum::http::{Request, Uri};
use url::form_urlencoded;

/// Value of a single query key: either one string or every value of a
/// repeated key, in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(first) => {
                let first = std::mem::take(first);
                *self = QueryValue::Multiple(vec![first, value]);
            }
            QueryValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Multiple(values)
    }
}

/// Returns the single string carried by a query value.
///
/// A repeated key yields its first value. An empty list counts as absent.
pub fn first_of(value: Option<&QueryValue>) -> Option<&str> {
    match value? {
        QueryValue::Single(value) => Some(value.as_str()),
        QueryValue::Multiple(values) => values.first().map(String::as_str),
    }
}

/// Ordered, mutable view of a request's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw (percent-encoded) query string.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match params.position(&key) {
                Some(index) => params.entries[index].1.push(value.into_owned()),
                None => params
                    .entries
                    .push((key.into_owned(), QueryValue::Single(value.into_owned()))),
            }
        }
        params
    }

    /// Snapshot of the query carried by `source`.
    pub fn from_source(source: &impl QuerySource) -> Self {
        source.query_string().map(Self::parse).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// First value stored under `key`, see [`first_of`].
    pub fn first(&self, key: &str) -> Option<&str> {
        first_of(self.get(key))
    }

    /// Store `value` under `key`, replacing whatever was there. A new key is
    /// appended after the existing ones.
    pub fn set(&mut self, key: &str, value: impl Into<QueryValue>) {
        let value = value.into();
        match self.position(key) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percent-encode back into a query string. Repeated keys are written
    /// once per value.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            match value {
                QueryValue::Single(value) => {
                    serializer.append_pair(key, value);
                }
                QueryValue::Multiple(values) => {
                    for value in values {
                        serializer.append_pair(key, value);
                    }
                }
            }
        }
        serializer.finish()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

/// Replace selected keys in a raw query string, leaving everything else
/// byte-for-byte as it arrived.
///
/// Every segment whose decoded key appears in `updates` is dropped, and the
/// first one is substituted with the new `key=value` pair (or nothing for a
/// `None` value). Updated keys that were not in the query are appended.
pub fn splice_query(raw: &str, updates: &[(&str, Option<&str>)]) -> String {
    let mut written = vec![false; updates.len()];
    let mut segments: Vec<String> = Vec::new();

    for segment in raw.split('&') {
        let matched = segment_key(segment)
            .and_then(|key| updates.iter().position(|(name, _)| *name == key));
        match matched {
            Some(index) => {
                if !written[index] {
                    written[index] = true;
                    if let Some(pair) = encode_pair(updates[index]) {
                        segments.push(pair);
                    }
                }
            }
            None if segment.is_empty() => {}
            None => segments.push(segment.to_string()),
        }
    }

    for (index, update) in updates.iter().enumerate() {
        if !written[index] {
            segments.extend(encode_pair(*update));
        }
    }

    segments.join("&")
}

/// Decoded key of one raw `key=value` segment.
fn segment_key(segment: &str) -> Option<String> {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
}

fn encode_pair((key, value): (&str, Option<&str>)) -> Option<String> {
    let value = value?;
    Some(
        form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish(),
    )
}

/// Build a URI equal to `uri` with its raw query replaced by `query`. An
/// empty query drops the `?` entirely.
pub fn with_query(uri: &Uri, query: &str) -> Result<Uri, axum::http::Error> {
    let path = uri.path();
    let path_and_query = if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse()?);
    Ok(Uri::from_parts(parts)?)
}

/// Anything that carries a request URI query.
pub trait QuerySource {
    fn query_string(&self) -> Option<&str>;
}

impl QuerySource for Uri {
    fn query_string(&self) -> Option<&str> {
        self.query()
    }
}

impl QuerySource for Parts {
    fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }
}

impl<B> QuerySource for Request<B> {
    fn query_string(&self) -> Option<&str> {
        self.uri().query()
    }
}

/// Parse the leading integer of `raw`.
///
/// Skips leading whitespace, accepts one sign and a `0x`/`0X` hex prefix,
/// then reads digits until the first non-digit. Returns `None` when no digit
/// was read. Out-of-range values saturate at the `i64` bounds.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let mut rest = raw.trim_start();

    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = if rest.starts_with("0x") || rest.starts_with("0X") {
        rest = &rest[2..];
        16
    } else {
        10
    };

    let mut value: i64 = 0;
    let mut digits = 0usize;
    for c in rest.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
        digits += 1;
    }

    if digits == 0 {
        return None;
    }

    Some(if negative { -value } else { value })
}
