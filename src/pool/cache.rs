//! Persisted, TTL-bounded directory listing.
//!
//! Scanning the image directory on every request would dominate the pipeline,
//! so the eligible filenames are cached in a JSON record stored alongside the
//! images. Because each request may be served by a fresh process, freshness is
//! judged by the record file's own modification time against the injected
//! clock, never by process-local state.
//!
//! Concurrent rebuilders may race; each write is an atomic replace
//! (temp file + rename), so readers see either the old record or the new one,
//! never a torn file. Last writer wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::clock::Clock;
use crate::error::PoolError;

/// Name of the cache record, stored inside the image directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Extensions eligible for the pool. Matched case-sensitively: an upper-case
/// extension does not qualify.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "gif"];

/// The pool cache over one source directory.
#[derive(Debug, Clone)]
pub struct PoolCache {
    dir: PathBuf,
    ttl: Duration,
}

impl PoolCache {
    /// Create a cache for `dir` with a TTL given in hours.
    pub fn new(dir: impl Into<PathBuf>, cache_hours: u64) -> Self {
        Self {
            dir: dir.into(),
            ttl: Duration::from_secs(cache_hours * 3600),
        }
    }

    /// The source directory this cache covers.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the persisted record.
    pub fn record_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Return the pool filenames, rescanning the directory only when the
    /// persisted record is missing, stale, or unreadable.
    ///
    /// # Errors
    ///
    /// [`PoolError::Unavailable`] if the directory cannot be read or the
    /// rebuilt record cannot be written.
    pub fn load(&self, clock: &dyn Clock) -> Result<Vec<String>, PoolError> {
        if let Some(names) = self.read_fresh_record(clock) {
            tracing::debug!(count = names.len(), "pool cache hit");
            return Ok(names);
        }
        self.rebuild()
    }

    /// Read the persisted record if it exists, is younger than the TTL, and
    /// parses. Anything else means a rebuild is due.
    fn read_fresh_record(&self, clock: &dyn Clock) -> Option<Vec<String>> {
        let path = self.record_path();
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        // a record stamped in the future counts as age zero
        let age = clock
            .now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            return None;
        }
        let raw = fs::read(&path).ok()?;
        serde_json::from_slice(&raw).ok()
    }

    /// Scan the directory, persist the filtered listing, and return it.
    ///
    /// The persisted record is replaced unconditionally; no merge with prior
    /// content. The write is atomic (temp file + rename).
    pub fn rebuild(&self) -> Result<Vec<String>, PoolError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| self.unavailable(source))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.unavailable(source))?;
            if let Some(name) = entry.file_name().to_str() {
                if has_image_extension(name) {
                    names.push(name.to_string());
                }
            }
        }
        // read_dir order is filesystem-dependent; sort so the record is stable
        names.sort();

        self.persist(&names)?;
        tracing::info!(count = names.len(), dir = %self.dir.display(), "pool cache rebuilt");
        Ok(names)
    }

    fn persist(&self, names: &[String]) -> Result<(), PoolError> {
        // unique per writer so racing rebuilders never share a temp file
        static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

        let body = serde_json::to_vec(names)
            .map_err(|e| self.unavailable(std::io::Error::other(e)))?;

        let tmp = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            CACHE_FILE_NAME,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp, body).map_err(|source| self.unavailable(source))?;
        fs::rename(&tmp, self.record_path()).map_err(|source| self.unavailable(source))?;
        Ok(())
    }

    fn unavailable(&self, source: std::io::Error) -> PoolError {
        PoolError::Unavailable {
            path: self.dir.clone(),
            source,
        }
    }
}

/// Whether a filename carries one of the eligible image extensions.
fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
}

// =============================================================================
// Tests
// =============================================================================
