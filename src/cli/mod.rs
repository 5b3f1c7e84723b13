//! Command-line interface for docs-server
//!
//! # Commands
//!
//! - `render <TEMPLATE>` - Render one page to stdout or `--output`
//! - `render-all` - Render every public page into `--output-dir`
//! - `list` - List routable pages (or partials with `--partials`)
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config <PATH>` - Configuration file (default `docs-server.toml`,
//!   or `DOCS_SERVER_CONFIG`)
//!
//! Logs go to stderr so rendered pages on stdout can be piped. `RUST_LOG`
//! takes precedence over the verbosity flags.
//!
//! # Examples
//!
//! ```bash
//! docs-server render tabs
//! docs-server render tabs --lang fr --output out/tabs.html
//! docs-server --config site/docs-server.toml render-all --max-parallel 4
//! docs-server list --partials
//! ```

mod common;
mod list;
mod render;
mod render_all;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: Option<String>,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// Does nothing if one is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .try_init();
    }
}

/// Render documentation pages from templates and JSON data.
#[derive(Parser, Debug)]
#[command(
    name = "docs-server",
    about = "Render documentation pages from Tera templates and JSON data",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(long, global = true, env = "DOCS_SERVER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one page
    Render(render::RenderCommand),

    /// Render every public page into a directory
    RenderAll(render_all::RenderAllCommand),

    /// List available templates
    List(list::ListCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns the failure of the configuration load or of the command itself.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit [`CliConfig`].
    ///
    /// # Errors
    ///
    /// Returns the failure of the configuration load or of the command itself.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();
        let server = ServerConfig::load_with_optional(config.config_path).await?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&server).await,
            Commands::RenderAll(cmd) => cmd.execute(&server).await,
            Commands::List(cmd) => cmd.execute(&server).await,
        }
    }
}
