//! Test utilities for docs-server
//!
//! Helpers shared by unit and integration tests: one-time logging setup and
//! fixtures for template trees that can live in memory or on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use docs_server::sources::Request;
//! use docs_server::sources::DataSourceRegistry;
//! use docs_server::test_utils::TemplateTreeFixture;
//!
//! let factory = TemplateTreeFixture::new()
//!     .public("tabs", "<h1>{{ apis }}</h1>{% include \"header\" %}")
//!     .private("header", "<nav>{{ static }}</nav>")
//!     .memory_factory();
//!
//! let page = factory.create(&Request::new("/tabs.html"), DataSourceRegistry::new());
//! assert!(page.render("tabs").unwrap().is_some());
//! ```

pub mod fixtures;

pub use fixtures::{TemplateTreeFixture, static_upstream};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=docs_server=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
