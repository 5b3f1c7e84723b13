//! List available templates.

use anyhow::{Context, Result};
use clap::Args;

use super::common::template_names;
use crate::config::ServerConfig;

/// List routable pages, or partials with `--partials`.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// List partials instead of routable pages
    #[arg(long)]
    partials: bool,
}

impl ListCommand {
    /// Print one template name per line.
    ///
    /// # Errors
    ///
    /// Fails if the template directory cannot be listed.
    pub async fn execute(self, config: &ServerConfig) -> Result<()> {
        let dir = if self.partials {
            &config.templates.private
        } else {
            &config.templates.public
        };

        let fs = config.file_system();
        let names = template_names(fs.as_ref(), dir)
            .with_context(|| format!("Failed to list templates in {dir}"))?;
        tracing::debug!("Found {} template(s) in {}", names.len(), dir);

        for name in names {
            println!("{name}");
        }
        Ok(())
    }
}
