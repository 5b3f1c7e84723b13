//! The per-request template renderer.

use std::sync::Arc;

use super::cache::CompiledFileCache;
use super::context::{ContextBuilder, RenderContext};
use super::factory::TemplatePaths;
use super::template::{CompiledTemplate, PartialResolver};
use super::utils::template_path;
use crate::constants::context_keys;
use crate::core::Result;
use crate::sources::{DataSource, DataSourceRegistry};

/// Renders templates for one request.
///
/// Created by [`TemplateDataSourceFactory::create`](super::TemplateDataSourceFactory::create);
/// cheap to build because the compiled-template cache is shared. Top-level
/// pages are looked up under the public template path, partials under the
/// private one, and the two namespaces never mix.
///
/// The instance is also the [`PartialResolver`] bound to `partials` in every
/// context it builds, so templates can pull in sub-templates while they render.
pub struct TemplateDataSource {
    pub(super) api: Arc<dyn DataSource>,
    pub(super) api_list: Arc<dyn DataSource>,
    pub(super) intro: Arc<dyn DataSource>,
    pub(super) samples: Arc<dyn DataSource>,
    pub(super) permissions: Arc<dyn DataSource>,
    pub(super) cache: Arc<CompiledFileCache<CompiledTemplate>>,
    pub(super) paths: Arc<TemplatePaths>,
    pub(super) extras: DataSourceRegistry,
}

impl TemplateDataSource {
    /// Render the public template `template_name`.
    ///
    /// Returns `Ok(None)` when no such template exists. Errors reported by the
    /// template engine are logged and the best-effort text is still returned.
    ///
    /// # Errors
    ///
    /// Returns an error for file system or data source failures other than
    /// the template being absent.
    pub fn render(&self, template_name: &str) -> Result<Option<String>> {
        let Some(template) = self.get_template(&self.paths.public, template_name)? else {
            tracing::debug!("No public template named '{}'", template_name);
            return Ok(None);
        };

        let context = self.render_context();
        let output = template.render(&context)?;

        if !output.errors.is_empty() {
            let joined = output.errors.join("\n");
            tracing::error!(
                template = %template_name,
                errors = %joined,
                "Template error(s) rendering {}",
                template_name
            );
        }

        Ok(Some(output.text))
    }

    /// Build the context a render of this instance uses.
    #[must_use]
    pub fn render_context(&self) -> RenderContext<'_> {
        ContextBuilder::new(self)
            .source(context_keys::API_LIST, &self.api_list)
            .source(context_keys::APIS, &self.api)
            .source(context_keys::INTROS, &self.intro)
            .source(context_keys::PERMISSIONS, &self.permissions)
            .source(context_keys::SAMPLES, &self.samples)
            .constants(&self.paths.base_path)
            .extras(&self.extras)
            .build()
    }

    /// Fetch the compiled template `template_name` under `base_path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Any other cache or file system failure is returned as is.
    pub fn get_template(
        &self,
        base_path: &str,
        template_name: &str,
    ) -> Result<Option<Arc<CompiledTemplate>>> {
        match self.cache.get_from_file(&template_path(base_path, template_name)) {
            Ok(template) => Ok(Some(template)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The caller-supplied data sources layered over the fixed entries.
    #[must_use]
    pub fn extras(&self) -> &DataSourceRegistry {
        &self.extras
    }
}

impl PartialResolver for TemplateDataSource {
    fn get(&self, key: &str) -> Result<Option<Arc<CompiledTemplate>>> {
        self.get_template(&self.paths.private, key)
    }
}
