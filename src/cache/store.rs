//! File-backed cache store
//!
//! Provides a `CacheStore` that maps URIs to files inside a cache directory,
//! decides freshness from filesystem timestamps and installs new content
//! atomically so readers never observe a partially written file.

use chrono::{DateTime, Utc};
use log::trace;
use reqwest::Url;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::Builder;

use crate::error::FetchError;

/// Prefix for staging files created while a download is being written
const STAGING_PREFIX: &str = ".zonecache-";

/// Suffix for staging files created while a download is being written
const STAGING_SUFFIX: &str = ".part";

/// Maps resources to cache files in a single directory
///
/// Two URIs with the same final path segment map to the same file. Callers
/// sharing a directory must keep their file names distinct.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `cache_dir`
    ///
    /// The directory is not created or checked here.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Returns the directory this store writes into
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the cache file path for `uri`
    ///
    /// The file name is the last path segment of the URI, so
    /// `https://example.org/data/zones.xml` maps to `<cache_dir>/zones.xml`.
    ///
    /// # Errors
    /// * `FetchError::InvalidUri` if the URI cannot be parsed or has no
    ///   usable final segment (e.g. it ends in `/`)
    pub fn path_for(&self, uri: &str) -> Result<PathBuf, FetchError> {
        let url = Url::parse(uri).map_err(|e| FetchError::invalid_uri(uri, e.to_string()))?;
        self.path_for_url(&url)
    }

    pub(crate) fn path_for_url(&self, url: &Url) -> Result<PathBuf, FetchError> {
        let segment = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();

        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(FetchError::invalid_uri(
                url.as_str(),
                "URI has no final path segment to name the cache file",
            ));
        }

        Ok(self.cache_dir.join(segment))
    }

    /// Returns the timestamp freshness is measured from
    ///
    /// This is the file's creation time, or its modification time where the
    /// platform does not record creation. `None` if no file exists at `path`.
    pub fn created_at(path: &Path) -> Option<DateTime<Utc>> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }

        metadata
            .created()
            .or_else(|_| metadata.modified())
            .ok()
            .map(DateTime::<Utc>::from)
    }

    /// Returns `true` if `path` is missing or older than `ttl`
    ///
    /// A TTL of zero expires an entry as soon as any time has passed. A TTL
    /// too large to represent never expires.
    pub fn is_expired(path: &Path, ttl: Duration) -> bool {
        let Some(created) = Self::created_at(path) else {
            return true;
        };

        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let age = Utc::now() - created;
        trace!("{} is {}ms old", path.display(), age.num_milliseconds());

        age > ttl
    }

    /// Atomically replaces the file at `path` with `content`
    ///
    /// The content is written and synced to a staging file in the cache
    /// directory, then renamed over `path`. On any failure the staging file
    /// is removed and an existing file at `path` is left as it was.
    ///
    /// # Errors
    /// * `FetchError::CacheDirectory` if the staging file cannot be created
    /// * `FetchError::Io` if writing, syncing or renaming fails
    pub fn store(&self, path: &Path, content: &[u8]) -> Result<(), FetchError> {
        let mut staging = Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(&self.cache_dir)
            .map_err(|source| FetchError::CacheDirectory {
                path: self.cache_dir.clone(),
                source,
            })?;

        staging
            .write_all(content)
            .map_err(|e| FetchError::io(staging.path(), e))?;
        staging
            .as_file()
            .sync_all()
            .map_err(|e| FetchError::io(staging.path(), e))?;

        staging
            .persist(path)
            .map_err(|e| FetchError::io(path, e.error))?;

        Ok(())
    }

    /// Reads the cache file at `path` as text
    pub fn load(path: &Path) -> Result<String, FetchError> {
        fs::read_to_string(path).map_err(|e| FetchError::io(path, e))
    }
}
