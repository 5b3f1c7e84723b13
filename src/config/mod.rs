//! Configuration for the docs server
//!
//! A single TOML file (`docs-server.toml` by default) says where templates and
//! data documents live. Every field has a default, so an empty or missing file
//! describes the conventional layout:
//!
//! ```toml
//! root = "."                              # file system root, relative to this file
//!
//! [templates]
//! public = "templates/public"             # directly routable pages
//! private = "templates/private"           # partials
//! base_path = "/chrome/extensions/"       # static = base_path + "static"
//!
//! [data]
//! apis = "data/apis.json"                 # per request, localized
//! api_list = "data/api_list.json"
//! intros = "data/intros.json"
//! samples = "data/samples.json"           # per request, localized
//! permissions = "data/permissions.json"
//! references = "data/references.json"     # optional `$ref:` link table
//! ```
//!
//! # Location
//!
//! 1. `--config <PATH>` on the command line
//! 2. The `DOCS_SERVER_CONFIG` environment variable
//! 3. `docs-server.toml` in the working directory, if present
//!
//! An explicitly named file must exist; the implicit default may be absent, in
//! which case [`ServerConfig::default`] applies.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::core::DocsError;
use crate::fs::{FileSystem, LocalFileSystem};
use crate::sources::{
    DataSource, JsonFileDataSource, JsonFileSourceFactory, SharedSourceFactory,
};
use crate::templating::{
    IdentityResolver, LinkResolver, ReferenceResolver, TemplateDataSourceFactory, TemplatePaths,
    UpstreamSources,
};

/// Locations of the JSON documents backing the upstream data sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// `apis`, localized per request
    pub apis: String,
    /// `api_list`
    pub api_list: String,
    /// `intros`
    pub intros: String,
    /// `samples`, localized per request
    pub samples: String,
    /// `permissions`
    pub permissions: String,
    /// Link table for `$ref:` references; none means links are left as written
    pub references: Option<String>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            apis: "data/apis.json".to_string(),
            api_list: "data/api_list.json".to_string(),
            intros: "data/intros.json".to_string(),
            samples: "data/samples.json".to_string(),
            permissions: "data/permissions.json".to_string(),
            references: None,
        }
    }
}

/// Server configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory every other path is relative to
    pub root: PathBuf,
    /// Template directories and the static base path
    pub templates: TemplatePaths,
    /// Data documents
    pub data: DataPaths,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            templates: TemplatePaths::default(),
            data: DataPaths::default(),
        }
    }
}

impl ServerConfig {
    /// Path of the configuration file when none is given explicitly.
    ///
    /// `DOCS_SERVER_CONFIG` wins over `docs-server.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Load the configuration from `path`, or from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file (argument or environment
    /// variable) is missing, or if any file found cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(&path).await;
        }
        if std::env::var_os(CONFIG_PATH_ENV).is_some() {
            return Self::load_from(&Self::default_path()).await;
        }

        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Load the configuration file at `path`.
    ///
    /// A relative `root` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`validate`](Self::validate).
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;

        if config.root.is_relative() {
            if let Some(dir) = path.parent() {
                config.root = dir.join(&config.root);
            }
        }

        config.validate()?;
        tracing::debug!("Loaded configuration from {} (root {})", path.display(), config.root.display());
        Ok(config)
    }

    /// Check settings that would otherwise fail at render time.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::ConfigError`] if the public and private template
    /// directories are empty or the same directory.
    pub fn validate(&self) -> std::result::Result<(), DocsError> {
        let public = self.templates.public.trim_matches('/');
        let private = self.templates.private.trim_matches('/');

        if public.is_empty() || private.is_empty() {
            return Err(DocsError::ConfigError {
                message: "templates.public and templates.private must not be empty".to_string(),
            });
        }
        if public == private {
            return Err(DocsError::ConfigError {
                message: format!(
                    "templates.public and templates.private must differ (both are '{public}')"
                ),
            });
        }
        Ok(())
    }

    /// File system rooted at [`root`](Self::root).
    pub fn file_system(&self) -> Arc<LocalFileSystem> {
        Arc::new(LocalFileSystem::new(self.root.clone()))
    }

    /// Build the process-wide template factory this configuration describes.
    ///
    /// Only the link table is read here; templates and data documents are
    /// read lazily when pages render.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured link table cannot be read or parsed.
    pub fn build_factory(&self) -> Result<TemplateDataSourceFactory> {
        let fs: Arc<dyn FileSystem> = self.file_system();
        let resolver = self.link_resolver(fs.as_ref())?;

        let shared = |name: &str, path: &str| {
            let source: Arc<dyn DataSource> =
                Arc::new(JsonFileDataSource::new(name, Arc::clone(&fs), path));
            Arc::new(SharedSourceFactory::new(source))
        };

        let sources = UpstreamSources {
            api: Arc::new(JsonFileSourceFactory::new("apis", Arc::clone(&fs), &self.data.apis)),
            api_list: shared("api_list", &self.data.api_list),
            intro: shared("intros", &self.data.intros),
            samples: Arc::new(JsonFileSourceFactory::new(
                "samples",
                Arc::clone(&fs),
                &self.data.samples,
            )),
            permissions: Arc::new(JsonFileDataSource::new(
                "permissions",
                Arc::clone(&fs),
                &self.data.permissions,
            )),
        };

        Ok(TemplateDataSourceFactory::new(sources, fs, resolver, self.templates.clone()))
    }

    fn link_resolver(&self, fs: &dyn FileSystem) -> Result<Arc<dyn LinkResolver>> {
        let Some(path) = &self.data.references else {
            return Ok(Arc::new(IdentityResolver));
        };

        let json = fs.read(path).with_context(|| format!("Failed to read link table {path}"))?;
        let resolver = ReferenceResolver::from_json(&json, path)?;
        tracing::debug!("Loaded {} link target(s) from {}", resolver.len(), path);
        Ok(Arc::new(resolver))
    }
}
