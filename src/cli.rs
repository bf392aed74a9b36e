//! Command-line interface parsing for zonecache
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a [`FetchConfig`].

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{FetchConfig, DEFAULT_TIMEOUT_MS, DEFAULT_TTL_SECS};
use crate::error::FetchError;

/// zonecache - fetch a remote text file through a local TTL cache
#[derive(Parser, Debug)]
#[command(name = "zonecache")]
#[command(about = "Fetch a remote text resource, reusing a cached copy while it is fresh")]
#[command(version)]
pub struct Cli {
    /// Absolute http(s) URI of the resource
    ///
    /// Example: https://example.org/data/zones.xml
    #[arg(value_name = "URI")]
    pub uri: String,

    /// Milliseconds a download may take before it is aborted
    #[arg(long, value_name = "MS", env = "ZONECACHE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Seconds a cached copy stays fresh
    #[arg(long, value_name = "SECS", env = "ZONECACHE_TTL_SECS", default_value_t = DEFAULT_TTL_SECS)]
    pub ttl_secs: u64,

    /// Directory for cache files (defaults to the system temp directory)
    #[arg(long, value_name = "DIR", env = "ZONECACHE_CACHE_DIR", conflicts_with = "user_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Use the per-user cache directory, creating it if needed
    #[arg(long)]
    pub user_cache: bool,

    /// Print a JSON object with the content and cache details
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Builds the fetch configuration described by the arguments
    ///
    /// # Errors
    /// * `FetchError::CacheDirectory` if `--user-cache` is set and the user
    ///   cache directory cannot be determined or created
    pub fn to_config(&self) -> Result<FetchConfig, FetchError> {
        let config = FetchConfig::default()
            .with_timeout_ms(self.timeout_ms)
            .with_ttl(Duration::from_secs(self.ttl_secs));

        if self.user_cache {
            let dir = FetchConfig::user_cache_dir().ok_or_else(|| FetchError::CacheDirectory {
                path: PathBuf::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no home directory for a user cache",
                ),
            })?;
            fs::create_dir_all(&dir).map_err(|source| FetchError::CacheDirectory {
                path: dir.clone(),
                source,
            })?;
            return Ok(config.with_cache_dir(dir));
        }

        Ok(match &self.cache_dir {
            Some(dir) => config.with_cache_dir(dir.clone()),
            None => config,
        })
    }
}
