//! Directory-backed file system.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FileSystem, trim_separators, validate_no_traversal};
use crate::core::{DocsError, Result};

/// [`FileSystem`] rooted at a directory on disk.
///
/// All paths are resolved relative to `root`; `..` components are rejected
/// so a template name taken from a request can never leave the tree.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    /// Create a file system rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// The directory all paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        validate_no_traversal(path)?;
        let relative = trim_separators(path);
        let mut resolved = self.root.clone();
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl FileSystem for LocalFileSystem {
    fn read(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path)?;
        tracing::trace!("Reading {}", full_path.display());

        std::fs::read_to_string(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DocsError::FileNotFound {
                path: path.to_string(),
            },
            _ => DocsError::FileReadError {
                path: path.to_string(),
                message: e.to_string(),
            },
        })
    }

    fn list(&self, dir: &str) -> Result<Vec<String>> {
        let base = self.resolve(dir)?;
        if !base.is_dir() {
            return Err(DocsError::FileNotFound {
                path: dir.to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&base)
            .follow_links(false)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            if let Ok(relative) = entry.path().strip_prefix(&base) {
                let segments: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                files.push(segments.join("/"));
            }
        }

        files.sort();
        tracing::debug!("Listed {} file(s) under {}", files.len(), base.display());
        Ok(files)
    }
}
