//! Upstream data sources consumed by the template layer.
//!
//! A data source is anything a template can read under a fixed name in the
//! render context (`apis`, `api_list`, `intros`, `samples`, `permissions`, or
//! a caller-supplied extra). The template layer treats them as opaque: it only
//! asks each one for its [`serde_json::Value`] when a page is rendered.
//!
//! Some sources specialize on the incoming [`Request`] (for example, to pick a
//! localized document), so they are produced per request by a
//! [`DataSourceFactory`]. Others are process-wide singletons handed out by a
//! [`SharedSourceFactory`].

mod json;
mod registry;
mod request;

pub use json::{JsonFileDataSource, JsonFileSourceFactory};
pub use registry::DataSourceRegistry;
pub use request::Request;

use serde_json::Value;
use std::sync::Arc;

use crate::core::Result;

/// A named value provider exposed to templates.
pub trait DataSource: Send + Sync {
    /// Produce the value templates see under this source's context name.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the render that requested the value.
    fn value(&self) -> Result<Value>;
}

/// Creates [`DataSource`] instances bound to one request.
///
/// Creation must be cheap and perform no I/O: it runs once per incoming
/// request, before anything is rendered.
pub trait DataSourceFactory: Send + Sync {
    /// Create (or hand out) the data source for `request`.
    fn create(&self, request: &Request) -> Arc<dyn DataSource>;
}

/// A data source with a fixed value.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    value: Value,
}

impl StaticDataSource {
    /// Wrap `value`.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self {
            value,
        }
    }
}

impl DataSource for StaticDataSource {
    fn value(&self) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// Factory that ignores the request and always returns the same instance.
///
/// Used for request-independent sources such as the API list and intros.
#[derive(Clone)]
pub struct SharedSourceFactory {
    source: Arc<dyn DataSource>,
}

impl SharedSourceFactory {
    /// Share `source` across every request.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
        }
    }
}

impl DataSourceFactory for SharedSourceFactory {
    fn create(&self, _request: &Request) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }
}
