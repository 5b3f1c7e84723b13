//! Compiled templates and the Tera-backed render operation.
//!
//! A [`CompiledTemplate`] is built once per file by the
//! [`TemplateCompiler`](super::TemplateCompiler) and then rendered many times
//! against different [`RenderContext`]s. Rendering never fails because of the
//! template itself: syntax problems, missing variables and missing partials all
//! end up in [`RenderOutput::errors`] next to the best-effort text. Only
//! failures of collaborators (file system, data sources) are returned as `Err`.

use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tera::Tera;

use super::context::RenderContext;
use crate::core::Result;

/// Words a template could use to reach a context entry.
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern is valid"));

/// Tera's name for the whole context.
const WHOLE_CONTEXT: &str = "__tera_context";

/// Supplies partial templates by key while a template renders.
pub trait PartialResolver: Send + Sync {
    /// Look up the partial registered under `key`.
    ///
    /// Returns `Ok(None)` when no such partial exists.
    ///
    /// # Errors
    ///
    /// Any error other than "not found" is fatal to the current render.
    fn get(&self, key: &str) -> Result<Option<Arc<CompiledTemplate>>>;
}

/// A partial referenced by a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartialRef {
    /// Key as written in the template, passed to [`PartialResolver::get`]
    pub key: String,
    /// Name the include was rewritten to; equals the partial's cache path
    pub name: String,
    /// Listed in an `include [..]` alternative list; a missing one is skipped
    pub optional: bool,
}

/// Result of rendering a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered text; best effort when `errors` is non-empty
    pub text: String,
    /// Problems encountered while rendering
    pub errors: Vec<String>,
}

impl RenderOutput {
    /// Whether rendering finished without any error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An immutable, parsed template.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    name: String,
    source: String,
    partials: Vec<PartialRef>,
    identifiers: HashSet<String>,
    engine: std::result::Result<Tera, String>,
}

impl CompiledTemplate {
    /// Parse `source` as the template `name`.
    ///
    /// `partials` lists the includes `source` refers to. A parse failure is
    /// kept and reported by every later [`render`](Self::render).
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>, partials: Vec<PartialRef>) -> Self {
        let name = name.into();
        let source = source.into();

        let mut tera = Tera::default();
        // Data sources carry markup of their own
        tera.autoescape_on(vec![]);
        let engine = match tera.add_raw_template(&name, &source) {
            Ok(()) => Ok(tera),
            Err(e) => {
                let message = format_tera_error(&e);
                tracing::debug!("Template {} failed to parse: {}", name, message);
                Err(message)
            }
        };

        let identifiers =
            IDENTIFIER_PATTERN.find_iter(&source).map(|m| m.as_str().to_string()).collect();

        Self {
            name,
            source,
            partials,
            identifiers,
            engine,
        }
    }

    /// Name the template was compiled under (its cache path).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text after link resolution and include rewriting.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Partials this template includes directly.
    #[must_use]
    pub fn partials(&self) -> &[PartialRef] {
        &self.partials
    }

    /// Parse error, if the source is not a valid template.
    #[must_use]
    pub fn parse_error(&self) -> Option<&str> {
        self.engine.as_ref().err().map(String::as_str)
    }

    /// Render against `context`.
    ///
    /// Every partial reachable from this template is fetched through the
    /// context's `partials` entry, each at most once per render. A partial
    /// that is missing, fails to parse or includes itself (directly or through
    /// other partials) is recorded in the output errors and renders as empty
    /// text. Data sources are only evaluated when this template or one of its
    /// partials mentions them.
    ///
    /// # Errors
    ///
    /// Returns an error if a needed data source or the partial resolver fails.
    pub fn render(&self, context: &RenderContext<'_>) -> Result<RenderOutput> {
        let mut tera = match &self.engine {
            Ok(engine) => engine.clone(),
            Err(message) => {
                return Ok(RenderOutput {
                    text: String::new(),
                    errors: vec![message.clone()],
                });
            }
        };

        let mut linker = PartialLinker {
            tera: &mut tera,
            resolver: context.partials(),
            errors: Vec::new(),
            linked: HashSet::from([self.name.clone()]),
            path: vec![self.name.clone()],
            mentioned: self.identifiers.clone(),
        };
        linker.link_all(&self.partials)?;
        let PartialLinker {
            mut errors,
            mentioned,
            ..
        } = linker;

        let needs_all = mentioned.contains(WHOLE_CONTEXT);
        let tera_context = context.to_tera_context_with(|key| needs_all || mentioned.contains(key))?;
        let text = match tera.render(&self.name, &tera_context) {
            Ok(text) => text,
            Err(e) => {
                errors.push(format_tera_error(&e));
                String::new()
            }
        };

        Ok(RenderOutput {
            text,
            errors,
        })
    }
}

/// Merges the partials a template reaches into its engine, depth first.
struct PartialLinker<'t, 'a> {
    tera: &'t mut Tera,
    resolver: Option<&'a dyn PartialResolver>,
    errors: Vec<String>,
    /// Names already merged or stubbed
    linked: HashSet<String>,
    /// Include chain leading to the partial being linked
    path: Vec<String>,
    /// Identifiers of every merged template
    mentioned: HashSet<String>,
}

impl PartialLinker<'_, '_> {
    fn link_all(&mut self, partials: &[PartialRef]) -> Result<()> {
        for partial in partials {
            if self.path.contains(&partial.name) {
                self.errors.push(format!("Partial '{}' includes itself", partial.key));
                self.stub(&partial.name);
                continue;
            }
            if !self.linked.insert(partial.name.clone()) {
                continue;
            }

            let resolved = match self.resolver {
                Some(resolver) => resolver.get(&partial.key)?,
                None => None,
            };

            match resolved.as_deref().map(|t| (t, &t.engine)) {
                Some((template, Ok(engine))) => {
                    if let Err(e) = self.tera.extend(engine) {
                        self.errors
                            .push(format!("Partial '{}': {}", partial.key, format_tera_error(&e)));
                        self.stub(&partial.name);
                        continue;
                    }
                    self.mentioned.extend(template.identifiers.iter().cloned());

                    self.path.push(partial.name.clone());
                    let linked = self.link_all(&template.partials);
                    self.path.pop();
                    linked?;
                }
                Some((_, Err(message))) => {
                    self.errors.push(format!("Partial '{}': {}", partial.key, message));
                    self.stub(&partial.name);
                }
                None if partial.optional => {
                    tracing::trace!("Skipping missing alternative partial '{}'", partial.key);
                    self.linked.remove(&partial.name);
                }
                None => {
                    self.errors.push(format!("Partial '{}' not found", partial.key));
                    self.stub(&partial.name);
                }
            }
        }

        Ok(())
    }

    /// Register an empty template so the include still renders.
    fn stub(&mut self, name: &str) {
        if let Err(e) = self.tera.add_raw_template(name, "") {
            self.errors.push(format_tera_error(&e));
        }
    }
}

/// Flatten a Tera error and its causes into one line.
///
/// Tera wraps the interesting message ("Variable `x` not found...") in one or
/// more generic "Failed to render" layers; every layer is kept, in order.
#[must_use]
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    messages.retain(|m| !m.trim().is_empty());
    messages.dedup();
    messages.join(": ")
}
