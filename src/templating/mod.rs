//! Template rendering for documentation pages.
//!
//! Pages are Tera templates stored in two directories: a **public** one of
//! directly routable pages and a **private** one of partials. A process owns
//! one [`TemplateDataSourceFactory`]; each incoming request gets a
//! [`TemplateDataSource`] from it and renders pages by name.
//!
//! # Overview
//!
//! ```text
//! TemplateDataSourceFactory ──create(request, extras)──> TemplateDataSource
//!        │                                                    │
//!        │ owns                                      render(name)
//!        ▼                                                    ▼
//! CompiledFileCache ◄──── get_template(public, name) ─── RenderContext
//!        │ miss                                               │
//!        ▼                                                    ▼
//! TemplateCompiler (links + includes) ──> CompiledTemplate::render
//! ```
//!
//! # Template Syntax
//!
//! Standard Tera syntax, plus:
//!
//! - `{% include "key" %}` pulls in the partial `key` from the private
//!   directory. Keys go through [`format_key`], so `"side.nav"` loads
//!   `side_nav.html`. Public pages are never reachable as partials.
//!   The list form `{% include ["custom", "default"] %}` is rewritten the same
//!   way and uses the first partial that exists.
//! - `$ref:name` and `$ref:[name title]` are rewritten to links when the
//!   template is compiled (see [`ReferenceResolver`]).
//!
//! # Render Context
//!
//! | Name | Value |
//! |------|-------|
//! | `apis`, `api_list`, `intros`, `samples`, `permissions` | upstream data sources |
//! | `apps_samples_url`, `extensions_samples_url` | fixed URLs |
//! | `static` | `base_path` followed by `static` |
//! | `true`, `false` | booleans |
//! | any extra | caller-supplied, wins on collision |
//!
//! # Errors
//!
//! A missing page renders as `Ok(None)`. Problems inside a template (bad
//! syntax, undefined variables, missing or self-including partials) are
//! logged and the best-effort text is still returned. Anything else is an
//! `Err`. Data sources are only evaluated when the page or one of its
//! partials mentions them, so a broken source only fails the pages using it.

mod cache;
mod compiler;
mod context;
mod data_source;
mod factory;
mod links;
mod template;
mod utils;

pub use cache::{CacheStats, CompileFn, CompiledFileCache};
pub use compiler::TemplateCompiler;
pub use context::{ContextBuilder, ContextValue, RenderContext};
pub use data_source::TemplateDataSource;
pub use factory::{TemplateDataSourceFactory, TemplatePaths, UpstreamSources};
pub use links::{IdentityResolver, LinkResolver, LinkTarget, ReferenceResolver};
pub use template::{CompiledTemplate, PartialRef, PartialResolver, RenderOutput, format_tera_error};
pub use utils::{format_key, template_path};
