//! The incoming request a template data source is bound to.

use std::collections::BTreeMap;

/// Minimal view of an HTTP request.
///
/// Only what data sources specialize on is kept: the path and the headers.
/// Header names are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Request path, e.g. `/extensions/tabs.html`
    pub path: String,
    headers: BTreeMap<String, String>,
}

impl Request {
    /// Create a request for `path` with no headers.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Primary language from `Accept-Language`, e.g. `fr` for `fr-CA,fr;q=0.8`.
    ///
    /// Quality values are ignored; the first listed language wins. `*` counts
    /// as no preference, and anything other than 1 to 8 ASCII letters is
    /// ignored.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        let header = self.header("accept-language")?;
        let first = header.split(',').next()?.split(';').next()?.trim();
        let primary = first.split('-').next()?.trim();

        if (1..=8).contains(&primary.len()) && primary.bytes().all(|b| b.is_ascii_alphabetic()) {
            Some(primary.to_ascii_lowercase())
        } else {
            None
        }
    }
}
