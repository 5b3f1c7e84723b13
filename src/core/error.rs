//! Error handling for the docs server
//!
//! This module provides the error type shared by every library component and the
//! user-friendly error reporting used by the CLI. It follows two principles:
//! 1. **Strongly-typed errors** so callers can tell "template missing" apart from
//!    real failures
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DocsError`] - Enumerated error types for all library failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **File System**: [`DocsError::FileNotFound`], [`DocsError::FileReadError`],
//!   [`DocsError::InvalidPath`]
//! - **Data Sources**: [`DocsError::DataSourceError`], [`DocsError::JsonError`]
//! - **Configuration**: [`DocsError::ConfigError`]
//!
//! `FileNotFound` is special: the template layer recovers from it locally and
//! turns it into an absent result. Every other variant is fatal to the render
//! that produced it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docs_server::core::{DocsError, user_friendly_error};
//!
//! let error = DocsError::FileNotFound {
//!     path: "templates/public/tabs.html".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Errors produced by the file system, data source and template layers.
///
/// The type is `Clone` because the compiled-template cache hands the same
/// failure to every caller that was waiting on the same key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocsError {
    /// The requested file does not exist.
    ///
    /// Raised by [`FileSystem::read`](crate::fs::FileSystem::read). Template
    /// lookups treat this as "no such template" rather than as a failure.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested, relative to the file system root
        path: String,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {path}: {message}")]
    FileReadError {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error message
        message: String,
    },

    /// The path escapes the file system root or is otherwise unusable.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// An upstream data source failed to produce its value.
    #[error("Data source '{name}' failed: {message}")]
    DataSourceError {
        /// Name of the data source (e.g. `apis`)
        name: String,
        /// Description of the failure
        message: String,
    },

    /// A JSON document could not be parsed.
    #[error("Invalid JSON in {path}: {message}")]
    JsonError {
        /// Path of the JSON document
        path: String,
        /// Parser error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Catch-all for errors that fit no other category
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl DocsError {
    /// Returns `true` for the one error the template layer recovers from.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Pairs a [`DocsError`] with an optional suggestion and details. The CLI
/// prints these with colors via [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DocsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DocsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`DocsError`] (anywhere in the chain), [`toml::de::Error`] and
/// template rendering failures; everything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(docs_error) = error.chain().find_map(|e| e.downcast_ref::<DocsError>()) {
        return create_error_context(docs_error.clone());
    }

    if let Some(toml_error) = error.chain().find_map(|e| e.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(DocsError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your docs-server.toml. Verify quotes, brackets and table names")
        .with_details("TOML parsing errors are usually caused by missing quotes or mismatched brackets");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DocsError::Other {
        message,
    })
}

fn create_error_context(error: DocsError) -> ErrorContext {
    match &error {
        DocsError::FileNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template name and the [templates] paths in docs-server.toml")
            .with_details("Template names are normalized: a trailing .html is optional and '.' becomes '_'"),
        DocsError::FileReadError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check file permissions and that the path is a regular file"),
        DocsError::InvalidPath {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use paths relative to the configured root without '..' components"),
        DocsError::DataSourceError {
            ..
        }
        | DocsError::JsonError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the files listed under [data] in docs-server.toml")
            .with_details("Data sources are loaded lazily the first time a page is rendered"),
        DocsError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion("Check your docs-server.toml configuration"),
        DocsError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
