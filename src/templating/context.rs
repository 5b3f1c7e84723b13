//! Render context construction.
//!
//! A [`RenderContext`] is the named mapping a template consults while it
//! renders. It is built fresh for every render by a [`ContextBuilder`]:
//!
//! ```text
//! api_list, apis, intros, samples, permissions   data sources
//! partials                                        partial resolver
//! apps_samples_url, extensions_samples_url       URL constants
//! static                                          base_path + "static"
//! true, false                                     booleans
//! <extras>                                        caller-supplied sources
//! ```
//!
//! Extras are layered last and win over fixed entries with the same name.
//!
//! Entries are typed: data sources stay unevaluated until
//! [`RenderContext::to_tera_context`] runs (and a render only evaluates the
//! ones its templates mention), and the partial resolver is a
//! capability rather than a value, so it never reaches Tera as data.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tera::Context as TeraContext;

use super::template::PartialResolver;
use crate::constants::{self, context_keys};
use crate::core::Result;
use crate::sources::{DataSource, DataSourceRegistry};

/// A single render context entry.
#[derive(Clone)]
pub enum ContextValue<'a> {
    /// A data source, evaluated when the context is handed to Tera
    Source(Arc<dyn DataSource>),
    /// A plain value
    Value(Value),
    /// The partial template resolver
    Partials(&'a dyn PartialResolver),
}

impl std::fmt::Debug for ContextValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(_) => f.write_str("Source(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Partials(_) => f.write_str("Partials(..)"),
        }
    }
}

/// Named entries available to a template during one render.
#[derive(Debug, Clone, Default)]
pub struct RenderContext<'a> {
    entries: BTreeMap<String, ContextValue<'a>>,
}

impl<'a> RenderContext<'a> {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue<'a>) -> Option<ContextValue<'a>> {
        self.entries.insert(key.into(), value)
    }

    /// Insert a data source entry.
    pub fn insert_source(&mut self, key: impl Into<String>, source: Arc<dyn DataSource>) {
        self.insert(key, ContextValue::Source(source));
    }

    /// Insert a plain value entry.
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) {
        self.insert(key, ContextValue::Value(value));
    }

    /// Bind `resolver` as the `partials` entry.
    #[must_use]
    pub fn with_partials(mut self, resolver: &'a dyn PartialResolver) -> Self {
        self.insert(context_keys::PARTIALS, ContextValue::Partials(resolver));
        self
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue<'a>> {
        self.entries.get(key)
    }

    /// Look up a data source entry.
    #[must_use]
    pub fn source(&self, key: &str) -> Option<&Arc<dyn DataSource>> {
        match self.entries.get(key)? {
            ContextValue::Source(source) => Some(source),
            _ => None,
        }
    }

    /// Look up a plain value entry.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key)? {
            ContextValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The resolver bound under `partials`, if any.
    #[must_use]
    pub fn partials(&self) -> Option<&'a dyn PartialResolver> {
        match self.entries.get(context_keys::PARTIALS)? {
            ContextValue::Partials(resolver) => Some(*resolver),
            _ => None,
        }
    }

    /// Entry names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Evaluate data sources and build the context Tera renders against.
    ///
    /// The partial resolver is not data and is left out.
    ///
    /// # Errors
    ///
    /// Returns the first data source failure.
    pub fn to_tera_context(&self) -> Result<TeraContext> {
        self.to_tera_context_with(|_| true)
    }

    /// Like [`to_tera_context`](Self::to_tera_context), but only data sources
    /// whose key satisfies `needed` are evaluated; the others are left out.
    ///
    /// # Errors
    ///
    /// Returns the first failure of a needed data source.
    pub fn to_tera_context_with(&self, needed: impl Fn(&str) -> bool) -> Result<TeraContext> {
        let mut context = TeraContext::new();
        for (key, entry) in &self.entries {
            match entry {
                ContextValue::Source(_) if !needed(key.as_str()) => {
                    tracing::trace!("Data source '{}' is not used, skipping", key);
                }
                ContextValue::Source(source) => context.insert(key.as_str(), &source.value()?),
                ContextValue::Value(value) => context.insert(key.as_str(), value),
                ContextValue::Partials(_) => {}
            }
        }
        Ok(context)
    }
}

/// Assembles the fixed render context entries plus caller extras.
pub struct ContextBuilder<'a> {
    context: RenderContext<'a>,
}

impl<'a> ContextBuilder<'a> {
    /// Start a context whose `partials` entry is `resolver`.
    pub fn new(resolver: &'a dyn PartialResolver) -> Self {
        Self {
            context: RenderContext::new().with_partials(resolver),
        }
    }

    /// Add a named data source.
    #[must_use]
    pub fn source(mut self, key: &str, source: &Arc<dyn DataSource>) -> Self {
        self.context.insert_source(key, Arc::clone(source));
        self
    }

    /// Add the URL constants, `static` and the boolean literals.
    #[must_use]
    pub fn constants(mut self, base_path: &str) -> Self {
        self.context.insert_value(
            context_keys::APPS_SAMPLES_URL,
            Value::from(constants::APPS_SAMPLES_URL),
        );
        self.context.insert_value(
            context_keys::EXTENSIONS_SAMPLES_URL,
            Value::from(constants::EXTENSIONS_SAMPLES_URL),
        );
        self.context.insert_value(
            context_keys::STATIC,
            Value::from(format!("{}{}", base_path, constants::STATIC_SUFFIX)),
        );
        self.context.insert_value(context_keys::TRUE, Value::Bool(true));
        self.context.insert_value(context_keys::FALSE, Value::Bool(false));
        self
    }

    /// Layer caller-supplied sources over everything added so far.
    #[must_use]
    pub fn extras(mut self, extras: &DataSourceRegistry) -> Self {
        for (name, source) in extras.iter() {
            if self.context.insert(name, ContextValue::Source(Arc::clone(source))).is_some() {
                tracing::debug!("Extra data source '{}' shadows a fixed context entry", name);
            }
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RenderContext<'a> {
        self.context
    }
}
