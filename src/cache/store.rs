//! Accelerator contract.
//!
//! The catalogs only ever talk to the accelerator through [`CacheStore`], so the
//! in-process [`MemoryCache`](super::MemoryCache) can be swapped for a networked
//! client without touching the data-access code.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key is present and has not expired.
    Hit(String),
    /// The key was never set, was deleted, or has expired.
    Miss,
}

/// Failure talking to the accelerator itself.
///
/// This is distinct from [`CacheLookup::Miss`]: a miss is routine, an
/// unavailable accelerator is an availability incident.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("accelerator unavailable: {0}")]
    Unavailable(String),
}

/// Key/value accelerator with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a key.
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheError>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
