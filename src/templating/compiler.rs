//! Turns raw template text into a [`CompiledTemplate`].

use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};

use super::links::LinkResolver;
use super::template::{CompiledTemplate, PartialRef};
use super::utils::template_path;

/// Matches `{% include "key" %}` and `{% include ["a", "b"] %}` (any quote
/// style, optional whitespace control and `ignore missing`).
static INCLUDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\{%(?P<open>-?)\s*include\s+(?:"(?P<dq>[^"]+)"|'(?P<sq>[^']+)'|`(?P<bq>[^`]+)`|\[(?P<list>[^\]]*)\])(?P<rest>[^%]*?)(?P<close>-?)%\}"#,
    )
    .expect("include pattern is valid")
});

/// One quoted key inside an include list.
static LIST_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?P<dq>[^"]+)"|'(?P<sq>[^']+)'|`(?P<bq>[^`]+)`"#).expect("list item pattern is valid")
});

/// Compiles template text: resolves links, then binds includes to partials.
///
/// Every `{% include "key" %}` is rewritten to the private-path cache key of
/// `key`, which is exactly the name the partial itself is compiled under. That
/// lets a render merge a cached partial into its engine without re-parsing it.
#[derive(Clone)]
pub struct TemplateCompiler {
    resolver: Arc<dyn LinkResolver>,
    partial_base_path: String,
}

impl TemplateCompiler {
    /// Create a compiler that binds includes under `partial_base_path`.
    pub fn new(resolver: Arc<dyn LinkResolver>, partial_base_path: impl Into<String>) -> Self {
        Self {
            resolver,
            partial_base_path: partial_base_path.into(),
        }
    }

    /// Compile `text`, read from the file `name`.
    ///
    /// `name` becomes the template's identity inside the engine and shows up
    /// in error messages; it does not otherwise affect the output.
    #[must_use]
    pub fn compile(&self, name: &str, text: &str) -> CompiledTemplate {
        let resolved = self.resolver.resolve_all_links(text);
        let (source, partials) = self.bind_partials(&resolved);
        tracing::trace!("Compiled {} with {} partial reference(s)", name, partials.len());
        CompiledTemplate::new(name, source, partials)
    }

    fn bind_partials(&self, text: &str) -> (String, Vec<PartialRef>) {
        let mut partials: Vec<PartialRef> = Vec::new();

        let source = INCLUDE_PATTERN.replace_all(text, |caps: &Captures<'_>| {
            let target = match caps.name("list") {
                Some(list) => {
                    let names: Vec<String> = LIST_ITEM_PATTERN
                        .captures_iter(list.as_str())
                        .map(|item| self.bind(&mut partials, quoted_key(&item), true))
                        .map(|name| format!("\"{name}\""))
                        .collect();
                    format!("[{}]", names.join(", "))
                }
                None => format!("\"{}\"", self.bind(&mut partials, quoted_key(caps), false)),
            };

            format!(
                "{{%{} include {}{}{}%}}",
                &caps["open"], target, &caps["rest"], &caps["close"]
            )
        });

        (source.into_owned(), partials)
    }

    /// Record `key` as a partial reference and return the name it binds to.
    ///
    /// A key included both plainly and as an alternative is required.
    fn bind(&self, partials: &mut Vec<PartialRef>, key: &str, optional: bool) -> String {
        let name = template_path(&self.partial_base_path, key);
        match partials.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.optional &= optional,
            None => partials.push(PartialRef {
                key: key.to_string(),
                name: name.clone(),
                optional,
            }),
        }
        name
    }
}

/// The quoted key captured by whichever quote group matched.
fn quoted_key<'t>(caps: &Captures<'t>) -> &'t str {
    ["dq", "sq", "bq"]
        .iter()
        .find_map(|group| caps.name(group))
        .map_or("", |m| m.as_str())
}
