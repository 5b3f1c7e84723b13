//! Data sources backed by JSON documents.

use serde_json::Value;
use std::sync::{Arc, OnceLock};

use super::{DataSource, DataSourceFactory, Request};
use crate::core::{DocsError, Result};
use crate::fs::FileSystem;

/// A data source whose value is a JSON document on a [`FileSystem`].
///
/// The document is read and parsed lazily on the first [`value`](DataSource::value)
/// call and reused afterwards, so creating one costs nothing. When a language is
/// set, a sibling `<stem>.<lang>.json` is preferred over the base document.
pub struct JsonFileDataSource {
    name: String,
    fs: Arc<dyn FileSystem>,
    path: String,
    language: Option<String>,
    loaded: OnceLock<Result<Value>>,
}

impl JsonFileDataSource {
    /// Create a source named `name` reading `path`.
    pub fn new(name: impl Into<String>, fs: Arc<dyn FileSystem>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fs,
            path: path.into(),
            language: None,
            loaded: OnceLock::new(),
        }
    }

    /// Prefer the document localized for `language`, if one exists.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    fn localized_path(&self) -> Option<String> {
        let language = self.language.as_deref()?;
        let stem = self.path.strip_suffix(".json").unwrap_or(&self.path);
        Some(format!("{stem}.{language}.json"))
    }

    fn read_document(&self) -> Result<(String, String)> {
        if let Some(localized) = self.localized_path() {
            match self.fs.read(&localized) {
                Ok(text) => return Ok((localized, text)),
                Err(e) if e.is_not_found() => {
                    tracing::trace!("No localized document at {}, using {}", localized, self.path);
                }
                Err(e) => return Err(e),
            }
        }
        let text = self.fs.read(&self.path)?;
        Ok((self.path.clone(), text))
    }

    fn load(&self) -> Result<Value> {
        let (path, text) = self.read_document().map_err(|e| DocsError::DataSourceError {
            name: self.name.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("Loaded data source '{}' from {}", self.name, path);

        serde_json::from_str(&text).map_err(|e| DocsError::JsonError {
            path,
            message: e.to_string(),
        })
    }
}

impl DataSource for JsonFileDataSource {
    fn value(&self) -> Result<Value> {
        self.loaded.get_or_init(|| self.load()).clone()
    }
}

/// Factory producing a [`JsonFileDataSource`] localized for each request.
pub struct JsonFileSourceFactory {
    name: String,
    fs: Arc<dyn FileSystem>,
    path: String,
}

impl JsonFileSourceFactory {
    /// Create a factory for the source `name` stored at `path`.
    pub fn new(name: impl Into<String>, fs: Arc<dyn FileSystem>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fs,
            path: path.into(),
        }
    }
}

impl DataSourceFactory for JsonFileSourceFactory {
    fn create(&self, request: &Request) -> Arc<dyn DataSource> {
        Arc::new(
            JsonFileDataSource::new(self.name.clone(), Arc::clone(&self.fs), self.path.clone())
                .with_language(request.language()),
        )
    }
}
