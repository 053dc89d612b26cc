use std::collections::hash_map::{Entry, HashMap};
use axum::http::HeaderMap;

/// Header carrying the client identity
pub const USER_AGENT_HEADER: &str = "user-agent";

/// Header carrying the hex nonce, named to pass for cache metadata
pub const NONCE_HEADER: &str = "x-cache";

/// Headers where a repeat is dropped rather than joined, as Node's HTTP
/// parser does
const SINGLE_VALUE_HEADERS: &[&str] = &[
    "age",
    "authorization",
    "content-length",
    "content-type",
    "etag",
    "expires",
    "from",
    "host",
    "if-modified-since",
    "if-unmodified-since",
    "last-modified",
    "location",
    "max-forwards",
    "proxy-authorization",
    "referer",
    "retry-after",
    "server",
    USER_AGENT_HEADER,
];

/// Request headers keyed by lowercase name.
///
/// A repeated header keeps its first value if it is single-valued, otherwise
/// all values are joined with `", "`. A doubled nonce header therefore never
/// parses as a nonce.
#[derive(Debug, Clone, Default)]
pub struct RequestHeaders {
    values: HashMap<String, String>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        RequestHeaders::default()
    }

    /// Insert a header, merging with an earlier value of the same name
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        match self.values.entry(name.to_ascii_lowercase()) {
            Entry::Vacant(entry) => {
                entry.insert(value.into());
            }
            Entry::Occupied(entry) if SINGLE_VALUE_HEADERS.contains(&entry.key().as_str()) => {}
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value.into());
            }
        }
    }

    /// Look up a header, case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.values.get(&name.to_ascii_lowercase()).map(String::as_str),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl<N, V> FromIterator<(N, V)> for RequestHeaders
where
    N: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = RequestHeaders::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

impl From<&HeaderMap> for RequestHeaders {
    /// Values that are not visible ASCII are dropped, which makes them count
    /// as absent.
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str(), v.to_string()))
            })
            .collect()
    }
}
