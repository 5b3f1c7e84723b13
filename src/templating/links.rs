//! Cross-reference link resolution.
//!
//! Template sources refer to other documentation pages symbolically:
//!
//! - `$ref:tabs.create` becomes a link titled with the target's default text
//! - `$ref:[tabs.create the create method]` becomes a link titled
//!   "the create method"
//!
//! Resolution happens once per template, when it is compiled, so rendered
//! pages only ever contain concrete links.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::{DocsError, Result};

static REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$ref:(?:\[([\w.#-]+)(?:\s+([^\]]+))?\]|([\w.#-]*\w))")
        .expect("reference pattern is valid")
});

/// Rewrites symbolic cross-references in raw template text.
pub trait LinkResolver: Send + Sync {
    /// Return `text` with every reference resolved to a concrete link.
    fn resolve_all_links(&self, text: &str) -> String;
}

/// Resolver that leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl LinkResolver for IdentityResolver {
    fn resolve_all_links(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Where a reference name points.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkTarget {
    /// Concrete URL of the target
    pub href: String,
    /// Link text used when the reference has no explicit title
    pub text: String,
}

/// Table-driven resolver for `$ref:` references.
///
/// Unknown references degrade to their title (or name) as plain text.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    targets: HashMap<String, LinkTarget>,
}

impl ReferenceResolver {
    /// Create a resolver with no known targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the target table from a JSON object of `name -> {href, text}`.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::JsonError`] if `json` is not such an object;
    /// `origin` names the document in the error.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        let targets: HashMap<String, LinkTarget> =
            serde_json::from_str(json).map_err(|e| DocsError::JsonError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            targets,
        })
    }

    /// Register a target, replacing any previous one with the same name.
    #[must_use]
    pub fn with_target(mut self, name: impl Into<String>, href: &str, text: &str) -> Self {
        self.targets.insert(
            name.into(),
            LinkTarget {
                href: href.to_string(),
                text: text.to_string(),
            },
        );
        self
    }

    /// Number of known targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn resolve(&self, caps: &Captures<'_>) -> String {
        let (name, title) = match caps.get(1) {
            Some(name) => (name.as_str(), caps.get(2).map(|t| t.as_str().trim())),
            None => (caps.get(3).map_or("", |m| m.as_str()), None),
        };

        match self.targets.get(name) {
            Some(target) => {
                format!("<a href=\"{}\">{}</a>", target.href, title.unwrap_or(&target.text))
            }
            None => {
                tracing::warn!("Could not resolve reference '{}'", name);
                title.unwrap_or(name).to_string()
            }
        }
    }
}

impl LinkResolver for ReferenceResolver {
    fn resolve_all_links(&self, text: &str) -> String {
        REF_PATTERN.replace_all(text, |caps: &Captures<'_>| self.resolve(caps)).into_owned()
    }
}
