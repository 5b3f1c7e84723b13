//! Process-wide owner of the template cache.

use serde::Deserialize;
use std::sync::Arc;

use super::cache::{CacheStats, CompileFn, CompiledFileCache};
use super::compiler::TemplateCompiler;
use super::data_source::TemplateDataSource;
use super::links::LinkResolver;
use super::template::CompiledTemplate;
use crate::fs::FileSystem;
use crate::sources::{DataSource, DataSourceFactory, DataSourceRegistry, Request};

/// Where templates live and where static assets are served from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplatePaths {
    /// Directory of directly routable pages
    pub public: String,
    /// Directory of partials
    pub private: String,
    /// URL prefix; `static` in the render context is this plus `static`
    pub base_path: String,
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            public: "templates/public".to_string(),
            private: "templates/private".to_string(),
            base_path: "/".to_string(),
        }
    }
}

/// The upstream data sources a factory hands to every instance it creates.
///
/// `api` and `samples` are specialized per request; the rest are expected to
/// be process-wide.
#[derive(Clone)]
pub struct UpstreamSources {
    /// Produces `apis`
    pub api: Arc<dyn DataSourceFactory>,
    /// Produces `api_list`
    pub api_list: Arc<dyn DataSourceFactory>,
    /// Produces `intros`
    pub intro: Arc<dyn DataSourceFactory>,
    /// Produces `samples`
    pub samples: Arc<dyn DataSourceFactory>,
    /// Bound as `permissions`
    pub permissions: Arc<dyn DataSource>,
}

/// Creates request-bound [`TemplateDataSource`]s.
///
/// Owns exactly one compiled-template cache and one link resolver, shared by
/// every instance it creates. Creating an instance performs no I/O and
/// compiles nothing.
pub struct TemplateDataSourceFactory {
    sources: UpstreamSources,
    cache: Arc<CompiledFileCache<CompiledTemplate>>,
    resolver: Arc<dyn LinkResolver>,
    paths: Arc<TemplatePaths>,
}

impl TemplateDataSourceFactory {
    /// Build a factory whose cache reads templates from `fs`.
    pub fn new(
        sources: UpstreamSources,
        fs: Arc<dyn FileSystem>,
        resolver: Arc<dyn LinkResolver>,
        paths: TemplatePaths,
    ) -> Self {
        let compiler = TemplateCompiler::new(Arc::clone(&resolver), paths.private.clone());
        let compile: CompileFn<CompiledTemplate> =
            Arc::new(move |name: &str, text: &str| compiler.compile(name, text));

        tracing::debug!(
            "Template factory: public={} private={} base_path={}",
            paths.public,
            paths.private,
            paths.base_path
        );

        Self {
            sources,
            cache: Arc::new(CompiledFileCache::new(fs, compile)),
            resolver,
            paths: Arc::new(paths),
        }
    }

    /// Create the renderer for `request`, layering `extras` over the fixed
    /// context entries of every page it renders.
    #[must_use]
    pub fn create(&self, request: &Request, extras: DataSourceRegistry) -> TemplateDataSource {
        TemplateDataSource {
            api: self.sources.api.create(request),
            api_list: self.sources.api_list.create(request),
            intro: self.sources.intro.create(request),
            samples: self.sources.samples.create(request),
            permissions: Arc::clone(&self.sources.permissions),
            cache: Arc::clone(&self.cache),
            paths: Arc::clone(&self.paths),
            extras,
        }
    }

    /// The shared compiled-template cache.
    #[must_use]
    pub fn cache(&self) -> &CompiledFileCache<CompiledTemplate> {
        &self.cache
    }

    /// Cache hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The link resolver templates are compiled with.
    #[must_use]
    pub fn resolver(&self) -> &Arc<dyn LinkResolver> {
        &self.resolver
    }

    /// Template locations.
    #[must_use]
    pub fn paths(&self) -> &TemplatePaths {
        &self.paths
    }
}
