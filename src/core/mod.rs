//! Core types shared by every layer of the docs server.
//!
//! - [`DocsError`] - the library error type
//! - [`ErrorContext`] / [`user_friendly_error`] - CLI-facing error reporting

pub mod error;

pub use error::{DocsError, ErrorContext, user_friendly_error};

/// Result alias used throughout the library.
pub type Result<T, E = DocsError> = std::result::Result<T, E>;
