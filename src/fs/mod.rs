//! File system access for templates and data files.
//!
//! The template layer never touches `std::fs` directly; it reads through the
//! [`FileSystem`] trait so the same code runs against a directory on disk
//! ([`LocalFileSystem`]) or an in-memory tree ([`InMemoryFileSystem`]).
//!
//! Paths are `/`-separated and relative to the file system root. A missing
//! file is always reported as [`DocsError::FileNotFound`] so callers can
//! recover from exactly that case.

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::InMemoryFileSystem;

use crate::core::{DocsError, Result};

/// Read-only access to a tree of text files.
pub trait FileSystem: Send + Sync {
    /// Read the whole file at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - [`DocsError::FileNotFound`] if nothing exists at `path`
    /// - [`DocsError::FileReadError`] for any other read failure
    /// - [`DocsError::InvalidPath`] if `path` escapes the root
    fn read(&self, path: &str) -> Result<String>;

    /// List every file below `dir`, recursively.
    ///
    /// Returned paths are relative to `dir`, `/`-separated and sorted.
    /// A missing directory yields [`DocsError::FileNotFound`].
    fn list(&self, dir: &str) -> Result<Vec<String>>;
}

/// Reject paths containing `..` components.
pub(crate) fn validate_no_traversal(path: &str) -> Result<()> {
    if path.split('/').any(|segment| segment == "..") {
        return Err(DocsError::InvalidPath {
            path: path.to_string(),
            reason: "parent directory references (..) are not allowed".to_string(),
        });
    }
    Ok(())
}

/// Strip leading and trailing separators so `/a/b/` and `a/b` address the same entry.
pub(crate) fn trim_separators(path: &str) -> &str {
    path.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_no_traversal() {
        assert!(validate_no_traversal("templates/public/tabs.html").is_ok());
        assert!(validate_no_traversal("templates/..hidden.html").is_ok());

        let err = validate_no_traversal("templates/../secrets.txt").unwrap_err();
        assert!(matches!(err, DocsError::InvalidPath { .. }));
    }

    #[test]
    fn test_trim_separators() {
        assert_eq!(trim_separators("/a/b/"), "a/b");
        assert_eq!(trim_separators("a"), "a");
        assert_eq!(trim_separators("/"), "");
    }
}
