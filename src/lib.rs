//! zonecache library
//!
//! Fetches a remote text resource through a single-directory file cache.
//! A cached copy is served while it is younger than the configured TTL;
//! otherwise the resource is downloaded again under a hard request timeout
//! and installed atomically.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zonecache::{FetchConfig, Fetcher};
//!
//! # async fn example() -> Result<(), zonecache::FetchError> {
//! let config = FetchConfig::default()
//!     .with_timeout_ms(5000)
//!     .with_ttl(Duration::from_secs(24 * 60 * 60));
//! let fetcher = Fetcher::new(&config)?;
//! let body = fetcher.fetch("https://example.org/data/zones.xml").await?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;

pub use cache::CacheStore;
pub use config::FetchConfig;
pub use error::{ErrorKind, FetchError};
pub use fetcher::{fetch, Fetched, Fetcher, Source};
