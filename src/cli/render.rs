//! Render a single page.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::request_for;
use crate::config::ServerConfig;
use crate::core::DocsError;
use crate::sources::DataSourceRegistry;
use crate::templating::template_path;

/// Render one public template to stdout or a file.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template name, e.g. `tabs` or `experimental.devtools`
    template: String,

    /// Language to prefer for localized data (e.g. `fr`)
    #[arg(long)]
    lang: Option<String>,

    /// Write the page to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderCommand {
    /// Render the page described by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the template does not exist, a data source cannot be loaded
    /// or the output cannot be written.
    pub async fn execute(self, config: &ServerConfig) -> Result<()> {
        let factory = config.build_factory()?;
        let request = request_for(&self.template, self.lang.as_deref());
        let page = factory.create(&request, DataSourceRegistry::new());

        let text = page
            .render(&self.template)
            .with_context(|| format!("Failed to render '{}'", self.template))?
            .ok_or_else(|| DocsError::FileNotFound {
                path: template_path(&config.templates.public, &self.template),
            })
            .with_context(|| format!("Template '{}' not found", self.template))?;

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                tokio::fs::write(&path, &text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("{} Rendered {} to {}", "✓".green(), self.template, path.display());
            }
            None => {
                print!("{text}");
                if !text.ends_with('\n') {
                    println!();
                }
            }
        }

        Ok(())
    }
}
