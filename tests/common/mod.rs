//! Common test utilities for docs-server integration tests
//!
//! Builds a realistic documentation site on disk: public pages, partials,
//! JSON data documents, a link table and a `docs-server.toml`.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use docs_server::test_utils::TemplateTreeFixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Configuration matching the layout written by [`TestSite::standard`].
pub const SITE_CONFIG: &str = r#"
root = "."

[templates]
public = "templates/public"
private = "templates/private"
base_path = "/chrome/extensions/"

[data]
apis = "data/apis.json"
api_list = "data/api_list.json"
intros = "data/intros.json"
samples = "data/samples.json"
permissions = "data/permissions.json"
references = "data/references.json"
"#;

/// A documentation site in a temporary directory.
pub struct TestSite {
    pub temp: TempDir,
}

impl TestSite {
    /// Pages `tabs`, `windows` and `broken`, partials `header`, `footer` and
    /// `side.nav`, English and French API data, and the configuration file.
    pub fn standard() -> Result<Self> {
        Self::with_fixture(standard_fixture())
    }

    /// Write `fixture` plus the configuration file.
    pub fn with_fixture(fixture: TemplateTreeFixture) -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        fixture.write_to(temp.path())?;
        fs::write(temp.path().join("docs-server.toml"), SITE_CONFIG)
            .context("Failed to write docs-server.toml")?;
        Ok(Self {
            temp,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("docs-server.toml")
    }

    /// Overwrite or add a file below the site root.
    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// The standard site as a fixture, for tests that want to extend it.
pub fn standard_fixture() -> TemplateTreeFixture {
    TemplateTreeFixture::new()
        .public(
            "tabs",
            "{% include \"header\" %}<h1>{{ apis.title }}</h1>\
             <p>See $ref:tabs.create.</p>\
             {% include \"side.nav\" %}{% include \"footer\" %}",
        )
        .public(
            "windows",
            "{% include \"header\" %}<ul>{% for api in api_list %}<li>{{ api }}</li>{% endfor %}</ul>",
        )
        .public("broken", "A{% include \"nope\" %}B{% include \"gone\" %}C")
        .private("header", "<header><img src=\"{{ static }}/logo.png\"></header>")
        .private("footer", "<footer>{{ samples | length }} samples</footer>")
        .private("side.nav", "<nav>{% for api in api_list %}{{ api }} {% endfor %}</nav>")
        .file("data/apis.json", r#"{"title": "chrome.tabs"}"#)
        .file("data/apis.fr.json", r#"{"title": "chrome.tabs (fr)"}"#)
        .file("data/api_list.json", r#"["tabs", "windows"]"#)
        .file("data/intros.json", "{}")
        .file("data/samples.json", r#"[{"name": "Tab Inspector"}, {"name": "Tab Shortcuts"}]"#)
        .file("data/permissions.json", r#"{"tabs": "Access browser tabs"}"#)
        .file(
            "data/references.json",
            r#"{"tabs.create": {"href": "tabs.html#method-create", "text": "tabs.create"}}"#,
        )
}

/// Expected render of the standard `tabs` page.
pub const TABS_PAGE: &str = "<header><img src=\"/chrome/extensions/static/logo.png\"></header>\
    <h1>chrome.tabs</h1>\
    <p>See <a href=\"tabs.html#method-create\">tabs.create</a>.</p>\
    <nav>tabs windows </nav>\
    <footer>2 samples</footer>";
