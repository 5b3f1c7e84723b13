//! File-keyed cache of compiled templates.
//!
//! [`CompiledFileCache`] maps a file path to the object compiled from that
//! file's contents. It is shared by every request a
//! [`TemplateDataSourceFactory`](super::TemplateDataSourceFactory) serves, so
//! it has to stay correct under concurrent access.
//!
//! # Concurrency
//!
//! Each key owns a slot (`Arc<OnceLock<..>>`) stored in a [`DashMap`]. The
//! first caller for a key initializes the slot; concurrent callers for the
//! same key block on that slot and observe the same outcome. This gives:
//!
//! - at most one read-and-compile per key while the entry is cached
//! - every concurrent caller sees the identical `Arc<T>` (or the same error)
//! - a slow compile only blocks callers of that key
//!
//! The map guard is released before a slot is initialized, so compiles never
//! hold a shard lock.
//!
//! # Failures
//!
//! Failed loads (including a missing file) are handed to all callers that
//! were waiting on the slot, then the slot is evicted so a later call reads
//! the file again. Successful entries live as long as the cache; there is no
//! invalidation.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::core::Result;
use crate::fs::FileSystem;

/// Compile function invoked on a cache miss with `(path, raw_text)`.
pub type CompileFn<T> = Arc<dyn Fn(&str, &str) -> T + Send + Sync>;

type Slot<T> = Arc<OnceLock<Result<Arc<T>>>>;

/// Hit/miss counters for a [`CompiledFileCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from an initialized slot
    pub hits: usize,
    /// Lookups that read and compiled the file
    pub misses: usize,
}

impl CacheStats {
    /// Hit rate as a percentage
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Memoizing map from file path to compiled object.
pub struct CompiledFileCache<T> {
    fs: Arc<dyn FileSystem>,
    compile: CompileFn<T>,
    entries: DashMap<String, Slot<T>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    compiles: AtomicUsize,
}

impl<T> CompiledFileCache<T> {
    /// Create an empty cache reading from `fs` and compiling with `compile`.
    pub fn new(fs: Arc<dyn FileSystem>, compile: CompileFn<T>) -> Self {
        Self {
            fs,
            compile,
            entries: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            compiles: AtomicUsize::new(0),
        }
    }

    /// Return the compiled object for `path`, reading and compiling it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the file system error for `path`; a missing file is reported
    /// as [`DocsError::FileNotFound`](crate::core::DocsError::FileNotFound).
    pub fn get_from_file(&self, path: &str) -> Result<Arc<T>> {
        let slot: Slot<T> = Arc::clone(self.entries.entry(path.to_string()).or_default().value());

        let mut loaded_here = false;
        let result = slot
            .get_or_init(|| {
                loaded_here = true;
                self.load(path)
            })
            .clone();

        if loaded_here {
            self.misses.fetch_add(1, Ordering::Relaxed);
            if let Err(e) = &result {
                tracing::debug!("Evicting failed cache entry {}: {}", path, e);
                self.entries.remove_if(path, |_, current| Arc::ptr_eq(current, &slot));
            }
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Cache hit for {}", path);
        }

        result
    }

    fn load(&self, path: &str) -> Result<Arc<T>> {
        let text = self.fs.read(path)?;
        self.compiles.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Compiling {} ({} bytes)", path, text.len());
        Ok(Arc::new((self.compile)(path, &text)))
    }

    /// Number of cached entries, including ones still being compiled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the compile function has run.
    #[must_use]
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }

    /// Current hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
