//! Cache-backed HTTP fetcher
//!
//! Returns the text of a remote resource, serving it from the cache store
//! while the cached file is younger than the configured TTL and downloading
//! it again otherwise.

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::{ensure_directory, FetchConfig};
use crate::error::FetchError;

/// User agent sent with every download
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where the returned content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A fresh cache file was read
    Cache,
    /// The resource was downloaded and stored first
    Network,
}

/// A fetched resource together with where it was read from
#[derive(Debug, Clone, Serialize)]
pub struct Fetched {
    /// The resource URI as given by the caller
    pub uri: String,
    /// Cache file the content was read from
    pub path: PathBuf,
    /// Whether a download took place
    pub source: Source,
    /// Text content of the resource
    pub content: String,
}

/// Fetches remote text resources through a [`CacheStore`]
///
/// The underlying HTTP client carries the configured timeout, so every
/// request it issues is bounded. Calls are independent: two concurrent
/// fetches of an expired entry both download, and the last one to finish
/// leaves its copy in the cache.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    store: CacheStore,
    timeout: Duration,
    ttl: Duration,
}

impl Fetcher {
    /// Creates a fetcher from `config`
    ///
    /// # Errors
    /// * `FetchError::Network` if the HTTP client cannot be built
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            store: CacheStore::new(config.cache_dir.clone()),
            timeout: config.timeout,
            ttl: config.ttl,
        })
    }

    /// Returns the cache store backing this fetcher
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Returns the text of the resource at `uri`
    ///
    /// See [`Fetcher::fetch_entry`] for the caching rules.
    pub async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        Ok(self.fetch_entry(uri).await?.content)
    }

    /// Returns the resource at `uri` along with its cache path and source
    ///
    /// # Behavior
    /// - If the cache file exists and is younger than the TTL, it is read
    ///   without contacting the network
    /// - Otherwise the resource is downloaded once, stored atomically and
    ///   then read back from the cache file
    /// - If the download fails, the error is returned and any existing cache
    ///   file, stale or not, is left untouched and not served
    ///
    /// # Errors
    /// * `FetchError::InvalidUri` / `FetchError::CacheDirectory` for bad input
    /// * `FetchError::Network` / `FetchError::Status` if the download fails
    /// * `FetchError::Timeout` if the download exceeds the timeout
    /// * `FetchError::Io` if the cache file cannot be written or read
    pub async fn fetch_entry(&self, uri: &str) -> Result<Fetched, FetchError> {
        let url = parse_uri(uri)?;
        let path = self.store.path_for_url(&url)?;

        let source = if CacheStore::is_expired(&path, self.ttl) {
            debug!("Cache miss for {}, downloading to {}", uri, path.display());
            ensure_directory(self.store.cache_dir())?;

            let body = match self.download(url).await {
                Ok(body) => body,
                Err(e) => {
                    if path.exists() {
                        warn!("Refresh of {} failed, keeping stale {}", uri, path.display());
                    }
                    return Err(e);
                }
            };

            self.store.store(&path, &body)?;
            debug!("Stored {} bytes at {}", body.len(), path.display());
            Source::Network
        } else {
            debug!("Cache hit for {} at {}", uri, path.display());
            Source::Cache
        };

        let content = CacheStore::load(&path)?;

        Ok(Fetched {
            uri: uri.to_string(),
            path,
            source,
            content,
        })
    }

    /// Downloads the full body of `url`, failing on any non-success status
    async fn download(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let uri = url.to_string();
        let to_error = |e| FetchError::from_request(&uri, self.timeout, e);

        let response = self.client.get(url).send().await.map_err(to_error)?;
        let response = response.error_for_status().map_err(to_error)?;
        let body = response.bytes().await.map_err(to_error)?;

        Ok(body.to_vec())
    }
}

/// Fetches `uri` once with a fetcher built from `config`
pub async fn fetch(uri: &str, config: &FetchConfig) -> Result<String, FetchError> {
    Fetcher::new(config)?.fetch(uri).await
}

/// Parses `uri`, accepting only absolute http and https URIs
fn parse_uri(uri: &str) -> Result<Url, FetchError> {
    let url = Url::parse(uri).map_err(|e| FetchError::invalid_uri(uri, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::invalid_uri(
            uri,
            format!("unsupported scheme '{}'", other),
        )),
    }
}
