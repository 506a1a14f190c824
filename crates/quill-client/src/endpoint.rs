//! Base URL normalization and query parameters.

use url::Url;

use crate::error::{Error, Result};

/// Path suffix of the Admin surface.
pub const ADMIN_API_SUFFIX: &str = "/ghost/api/admin";

/// Path suffix of the Content surface.
pub const CONTENT_API_SUFFIX: &str = "/ghost/api/content";

/// Partial suffixes stripped before the Admin suffix is appended, longest first.
pub(crate) const ADMIN_STRIP: &[&str] = &[ADMIN_API_SUFFIX, "/ghost/api", "/ghost"];

/// Partial suffixes stripped before the Content suffix is appended, longest first.
pub(crate) const CONTENT_STRIP: &[&str] = &[
    CONTENT_API_SUFFIX,
    ADMIN_API_SUFFIX,
    "/ghost/api",
    "/ghost",
];

/// Ordered query parameters.
///
/// A `None` value means "not set" and never reaches the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any earlier value with the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, Some(value.to_string()));
        self
    }

    /// Set a parameter that may be absent.
    pub fn set_opt<V: ToString>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.insert(name, value.map(|v| v.to_string()));
        self
    }

    /// Insert or replace a parameter in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of a set parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Parameters that have a value, in insertion order.
    pub fn defined(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_deref().map(|v| (n.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (k, v)| params.set(k, v))
    }
}

/// Canonicalize a user-supplied site URL onto an API surface.
///
/// Trailing slashes and any already-present partial suffix are removed before
/// `suffix` is appended, so the result is stable under repeated application.
pub(crate) fn normalize_base_url(raw: &str, strip: &[&str], suffix: &str) -> String {
    let mut base = raw.trim().trim_end_matches('/');
    if let Some(rest) = strip.iter().find_map(|s| base.strip_suffix(s)) {
        base = rest.trim_end_matches('/');
    }
    format!("{}{}", base, suffix)
}

/// Validate a normalized base URL.
pub(crate) fn parse_base_url(raw: &str, strip: &[&str], suffix: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::Config("base URL is required".to_string()));
    }
    let normalized = normalize_base_url(raw, strip, suffix);
    let parsed = Url::parse(&normalized)?;
    if parsed.cannot_be_a_base() {
        return Err(Error::Config(format!("'{}' is not a valid base URL", raw)));
    }
    Ok(normalized)
}

/// Join `endpoint` onto `base` and apply `params` with set semantics.
pub(crate) fn build_url(base: &str, endpoint: &str, params: &Params) -> Result<Url> {
    let endpoint = if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    };
    let mut url = Url::parse(&format!("{}{}", base, endpoint))?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (name, value) in params.defined() {
        match pairs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => pairs.push((name.to_string(), value.to_string())),
        }
    }
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    Ok(url)
}
