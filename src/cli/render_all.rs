//! Render every public page concurrently.
//!
//! All pages go through one [`TemplateDataSourceFactory`], so partials shared
//! between pages are read and compiled once no matter how many renders need
//! them at the same time.
//!
//! [`TemplateDataSourceFactory`]: crate::templating::TemplateDataSourceFactory

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::common::{request_for, template_names};
use crate::config::ServerConfig;
use crate::constants::DEFAULT_MAX_PARALLEL;
use crate::sources::DataSourceRegistry;
use crate::templating::format_key;

/// Render all public templates into a directory.
#[derive(Args, Debug)]
pub struct RenderAllCommand {
    /// Language to prefer for localized data (e.g. `fr`)
    #[arg(long)]
    lang: Option<String>,

    /// Directory the rendered pages are written to
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Maximum number of pages rendered at once
    #[arg(long, default_value_t = DEFAULT_MAX_PARALLEL)]
    max_parallel: usize,
}

impl RenderAllCommand {
    /// Render every page and write it to `output_dir/<key>.html`.
    ///
    /// Pages that render are written even when others fail; the command
    /// fails afterwards if any page did.
    ///
    /// # Errors
    ///
    /// Fails if the template directory cannot be listed, an output file
    /// cannot be written, or at least one page failed to render.
    pub async fn execute(self, config: &ServerConfig) -> Result<()> {
        let factory = Arc::new(config.build_factory()?);
        let fs = config.file_system();
        let names = template_names(fs.as_ref(), &config.templates.public).with_context(|| {
            format!("Failed to list templates in {}", config.templates.public)
        })?;

        if names.is_empty() {
            println!("No templates found in {}", config.templates.public);
            return Ok(());
        }

        let max_parallel = self.max_parallel.max(1);
        tracing::info!("Rendering {} page(s), at most {} at a time", names.len(), max_parallel);
        let semaphore = Arc::new(Semaphore::new(max_parallel));

        let renders = names.into_iter().map(|name| {
            let factory = Arc::clone(&factory);
            let semaphore = Arc::clone(&semaphore);
            let request = request_for(&name, self.lang.as_deref());

            async move {
                let _permit = semaphore.acquire_owned().await.context("Render queue closed")?;
                let template = name.clone();
                let rendered = tokio::task::spawn_blocking(move || {
                    factory.create(&request, DataSourceRegistry::new()).render(&template)
                })
                .await
                .with_context(|| format!("Render task for '{name}' panicked"))?
                .with_context(|| format!("Failed to render '{name}'"))?;
                Ok::<_, anyhow::Error>((name, rendered))
            }
        });
        let results = join_all(renders).await;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let mut written = 0;
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok((name, Some(text))) => {
                    let path = self.output_dir.join(format_key(&name));
                    if let Some(parent) = path.parent() {
                        tokio::fs::create_dir_all(parent)
                            .await
                            .with_context(|| format!("Failed to create {}", parent.display()))?;
                    }
                    tokio::fs::write(&path, text)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    written += 1;
                }
                Ok((name, None)) => {
                    tracing::warn!("Template '{}' disappeared while rendering", name);
                }
                Err(e) => {
                    tracing::error!("{:#}", e);
                    failures.push(e);
                }
            }
        }

        let stats = factory.stats();
        tracing::info!(
            "Template cache: {} hit(s), {} miss(es), {:.1}% hit rate",
            stats.hits,
            stats.misses,
            stats.hit_rate()
        );
        println!(
            "{} Rendered {} page(s) to {}",
            "✓".green(),
            written,
            self.output_dir.display()
        );

        let failed = failures.len();
        if let Some(first) = failures.into_iter().next() {
            return Err(first.context(format!("{failed} page(s) failed to render")));
        }
        Ok(())
    }
}
