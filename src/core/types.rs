use reqwest::Method;
use std::fmt;
use std::time::Duration;

/// Insertion-ordered request parameters.
///
/// The exchange verifies signatures against the parameters exactly as they
/// were serialized, so iteration order is the order of first insertion.
/// Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Params::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    /// `key=value` pairs joined by `&`, unescaped, in insertion order
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// How the response body must be turned into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Public GET calls; the body must be a JSON object
    Json,
    /// Private form-encoded POST calls; the body is JSON text regardless of content type
    Form,
}

/// Everything the executor needs to perform one logical request.
///
/// Built fresh per call and never mutated once handed over; retries replay
/// the same descriptor, signature included.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method_name: String,
    pub url: String,
    pub verb: Method,
    pub params: Params,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub shape: ResponseShape,
}

impl RequestDescriptor {
    pub fn get(method_name: impl Into<String>, url: impl Into<String>, params: Params) -> Self {
        Self {
            method_name: method_name.into(),
            url: url.into(),
            verb: Method::GET,
            params,
            headers: Vec::new(),
            timeout: Duration::from_millis(crate::core::config::DEFAULT_TIMEOUT_MS),
            shape: ResponseShape::Json,
        }
    }

    pub fn post_form(
        method_name: impl Into<String>,
        url: impl Into<String>,
        params: Params,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            url: url.into(),
            verb: Method::POST,
            params,
            headers: Vec::new(),
            timeout: Duration::from_millis(crate::core::config::DEFAULT_TIMEOUT_MS),
            shape: ResponseShape::Form,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Short description used in log lines and error messages
    pub fn describe(&self) -> String {
        format!("{} {} ({})", self.verb, self.url, self.method_name)
    }
}
