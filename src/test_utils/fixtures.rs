//! Template tree fixtures.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::fs::InMemoryFileSystem;
use crate::sources::{DataSourceFactory, SharedSourceFactory, StaticDataSource};
use crate::templating::{
    IdentityResolver, LinkResolver, TemplateDataSourceFactory, TemplatePaths, UpstreamSources,
    template_path,
};

/// Upstream sources with fixed values; `apis` is `api`.
pub fn static_upstream(api: Value) -> UpstreamSources {
    let shared = |value: Value| -> Arc<dyn DataSourceFactory> {
        Arc::new(SharedSourceFactory::new(Arc::new(StaticDataSource::new(value))))
    };
    UpstreamSources {
        api: shared(api),
        api_list: shared(json!(["tabs", "windows"])),
        intro: shared(json!({"tabs": "Interact with the browser's tab system."})),
        samples: shared(json!([{"name": "Tab Inspector"}])),
        permissions: Arc::new(StaticDataSource::new(json!({"tabs": "optional"}))),
    }
}

/// A set of public pages, partials and data files.
///
/// Template names are stored under the paths [`template_path`] gives them,
/// so `public("side.nav", ..)` lands at `templates/public/side_nav.html`.
#[derive(Clone, Debug)]
pub struct TemplateTreeFixture {
    pub paths: TemplatePaths,
    pub files: Vec<(String, String)>,
}

impl Default for TemplateTreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateTreeFixture {
    /// Empty tree using `templates/public`, `templates/private` and
    /// `/chrome/extensions/`.
    pub fn new() -> Self {
        Self {
            paths: TemplatePaths {
                base_path: "/chrome/extensions/".to_string(),
                ..TemplatePaths::default()
            },
            files: Vec::new(),
        }
    }

    /// Add a routable page.
    pub fn public(mut self, name: &str, text: &str) -> Self {
        self.files.push((template_path(&self.paths.public, name), text.to_string()));
        self
    }

    /// Add a partial.
    pub fn private(mut self, name: &str, text: &str) -> Self {
        self.files.push((template_path(&self.paths.private, name), text.to_string()));
        self
    }

    /// Add an arbitrary file at `path`.
    pub fn file(mut self, path: &str, text: &str) -> Self {
        self.files.push((path.to_string(), text.to_string()));
        self
    }

    /// Build an in-memory file system holding the tree.
    pub fn memory(&self) -> Arc<InMemoryFileSystem> {
        Arc::new(InMemoryFileSystem::from_files(self.files.iter().cloned()))
    }

    /// Factory over an in-memory copy of the tree with [`static_upstream`]
    /// sources and no link resolution.
    pub fn memory_factory(&self) -> TemplateDataSourceFactory {
        self.factory_over(self.memory(), Arc::new(IdentityResolver))
    }

    /// Factory over `fs` with [`static_upstream`] sources.
    pub fn factory_over(
        &self,
        fs: Arc<InMemoryFileSystem>,
        resolver: Arc<dyn LinkResolver>,
    ) -> TemplateDataSourceFactory {
        TemplateDataSourceFactory::new(
            static_upstream(json!({"name": "tabs"})),
            fs,
            resolver,
            self.paths.clone(),
        )
    }

    /// Write the tree below `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        for (path, text) in &self.files {
            let file_path = dir.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&file_path, text)
                .with_context(|| format!("Failed to write {}", file_path.display()))?;
        }
        Ok(())
    }
}
