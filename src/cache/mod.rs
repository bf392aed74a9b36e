//! Cache module for storing downloaded resources on disk
//!
//! Each resource is stored as one flat file in the cache directory, named
//! after the final path segment of its URI. Freshness is judged from the
//! file's creation time against a caller-supplied TTL; there is no sidecar
//! metadata.

mod store;

pub use store::CacheStore;
