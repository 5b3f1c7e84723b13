//! docs-server - template rendering for extension and app documentation
//!
//! Documentation pages are Tera templates filled from JSON data documents
//! (API descriptions, the API list, intros, samples and permissions). This
//! crate owns the rendering layer: a shared, concurrency-safe cache of compiled
//! templates, per-request renderers, partial lookup, and `$ref:` link
//! resolution.
//!
//! # Architecture Overview
//!
//! - One [`TemplateDataSourceFactory`](templating::TemplateDataSourceFactory)
//!   per process owns the compiled-template cache and the link resolver
//! - Each request gets a cheap [`TemplateDataSource`](templating::TemplateDataSource)
//!   that renders pages by name
//! - Templates and data are read through the [`fs::FileSystem`] trait
//!
//! # Core Modules
//!
//! - [`templating`] - Cache, compiler, render context and renderer
//! - [`sources`] - Data sources exposed to templates and the request they bind to
//! - [`fs`] - File system abstraction (on disk and in memory)
//! - [`config`] - `docs-server.toml` loading and factory wiring
//! - [`core`] - Error types and user-facing error reporting
//! - [`cli`] - The `docs-server` command line
//! - [`constants`] - URLs and context key names
//!
//! # Example
//!
//! ```rust,no_run
//! use docs_server::config::ServerConfig;
//! use docs_server::sources::{DataSourceRegistry, Request};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::load_with_optional(None).await?;
//! let factory = config.build_factory()?;
//!
//! let page = factory.create(&Request::new("/tabs.html"), DataSourceRegistry::new());
//! match page.render("tabs")? {
//!     Some(html) => println!("{html}"),
//!     None => eprintln!("no such page"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fs;
pub mod sources;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
