//! In-memory file system used by tests and embedders.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{FileSystem, trim_separators, validate_no_traversal};
use crate::core::{DocsError, Result};

/// [`FileSystem`] backed by a map of path to contents.
///
/// Counts reads so tests can assert that cached lookups perform no I/O.
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    files: RwLock<BTreeMap<String, String>>,
    reads: AtomicUsize,
}

impl InMemoryFileSystem {
    /// Create an empty file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a file system from `(path, contents)` pairs.
    pub fn from_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let fs = Self::new();
        for (path, contents) in files {
            fs.insert(path.as_ref(), contents);
        }
        fs
    }

    /// Add or replace a file.
    pub fn insert(&self, path: &str, contents: impl Into<String>) {
        let mut files = self.files.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        files.insert(trim_separators(path).to_string(), contents.into());
    }

    /// Number of successful and failed `read` calls so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read(&self, path: &str) -> Result<String> {
        validate_no_traversal(path)?;
        self.reads.fetch_add(1, Ordering::SeqCst);

        let files = self.files.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        files.get(trim_separators(path)).cloned().ok_or_else(|| DocsError::FileNotFound {
            path: path.to_string(),
        })
    }

    fn list(&self, dir: &str) -> Result<Vec<String>> {
        validate_no_traversal(dir)?;
        let prefix = format!("{}/", trim_separators(dir));

        let files = self.files.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let listed: Vec<String> = files
            .keys()
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .map(str::to_string)
            .collect();

        if listed.is_empty() {
            return Err(DocsError::FileNotFound {
                path: dir.to_string(),
            });
        }
        Ok(listed)
    }
}
