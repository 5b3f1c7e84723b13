//! Caller-supplied extra data sources.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::DataSource;

/// Named data sources merged into every render context of one
/// [`TemplateDataSource`](crate::templating::TemplateDataSource).
///
/// Entries are layered over the fixed context entries, so a name such as
/// `apis` replaces the default source for that request.
#[derive(Clone, Default)]
pub struct DataSourceRegistry {
    sources: BTreeMap<String, Arc<dyn DataSource>>,
}

impl DataSourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` under `name`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        self.insert(name, source);
        self
    }

    /// Register `source` under `name`, returning the entry it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        source: Arc<dyn DataSource>,
    ) -> Option<Arc<dyn DataSource>> {
        self.sources.insert(name.into(), source)
    }

    /// Look up a source by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn DataSource>> {
        self.sources.get(name)
    }

    /// Iterate over `(name, source)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn DataSource>)> {
        self.sources.iter().map(|(name, source)| (name.as_str(), source))
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticDataSource;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let first: Arc<dyn DataSource> = Arc::new(StaticDataSource::new(json!(1)));
        let second: Arc<dyn DataSource> = Arc::new(StaticDataSource::new(json!(2)));

        let mut registry = DataSourceRegistry::new().with("whats_new", Arc::clone(&first));
        let replaced = registry.insert("whats_new", Arc::clone(&second)).unwrap();

        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(registry.get("whats_new").unwrap(), &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let source: Arc<dyn DataSource> = Arc::new(StaticDataSource::default());
        let registry = DataSourceRegistry::new()
            .with("zeta", Arc::clone(&source))
            .with("alpha", Arc::clone(&source));

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
