//! Fetch configuration
//!
//! [`FetchConfig`] bundles the request timeout, the cache TTL and the
//! directory cache files live in.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::FetchError;

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default time-to-live for cache entries in seconds (24 hours)
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Settings governing a fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Hard deadline for a single download
    pub timeout: Duration,
    /// Maximum age of a cache entry before it is refreshed
    pub ttl: Duration,
    /// Directory holding cache files
    pub cache_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            cache_dir: std::env::temp_dir(),
        }
    }
}

impl FetchConfig {
    /// Sets the request timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = Duration::from_millis(timeout_ms);
        self
    }

    /// Sets the cache time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Returns the XDG-compliant per-user cache directory
    ///
    /// Uses `~/.cache/zonecache/` on Linux, or the equivalent path on other
    /// platforms. Returns `None` if no home directory can be determined.
    pub fn user_cache_dir() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "zonecache")?;
        Some(project_dirs.cache_dir().to_path_buf())
    }

    /// Checks that the cache directory exists and is a directory
    ///
    /// Writability is only known once a file is actually created there, so
    /// that is reported when the first download is stored.
    pub fn validate(&self) -> Result<(), FetchError> {
        ensure_directory(&self.cache_dir)
    }
}

pub(crate) fn ensure_directory(path: &Path) -> Result<(), FetchError> {
    let metadata = fs::metadata(path).map_err(|source| FetchError::CacheDirectory {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        Ok(())
    } else {
        Err(FetchError::CacheDirectory {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        })
    }
}
