//! Cache-aside helpers shared by the catalogs.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{CacheError, CacheLookup, CacheStore};

/// Key of a user's playlist listing (owned and collaborated).
pub fn playlists_key(user_id: &str) -> String {
    format!("playlists:{user_id}")
}

/// Key of a playlist's song listing.
pub fn playlist_songs_key(playlist_id: &str) -> String {
    format!("playlistSongs:{playlist_id}")
}

/// Key of an album's like count.
pub fn album_likes_key(album_id: &str) -> String {
    format!("albums:{album_id}")
}

/// Shared handle to the accelerator client.
///
/// Reads never fail: a miss, an undecodable entry and an unreachable
/// accelerator all come back as `None` so the caller consults the database.
/// Invalidation failures are returned, since a mutation must not report
/// success while its cache key may still be stale.
#[derive(Clone)]
pub struct Accelerator {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl Accelerator {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Expiry applied by [`Accelerator::fill`].
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up and decode a cached value.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key).await {
            Ok(CacheLookup::Hit(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("Cache hit for {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(CacheLookup::Miss) => {
                debug!("Cache miss for {}", key);
                None
            }
            Err(e) => {
                warn!("Cache read for {} fell back to database: {}", key, e);
                None
            }
        }
    }

    /// Repopulate a key after a database read. Best effort.
    pub async fn fill<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not encode cache entry {}: {}", key, e);
                return;
            }
        };

        match self.store.set(key, raw, self.ttl).await {
            Ok(()) => debug!("Cached {} for {:?}", key, self.ttl),
            Err(e) => warn!("Cache write for {} skipped: {}", key, e),
        }
    }

    /// Drop a key after a committed mutation.
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key).await?;
        debug!("Invalidated {}", key);
        Ok(())
    }

    /// Drop several keys, stopping at the first failure.
    pub async fn invalidate_all<I>(&self, keys: I) -> Result<(), CacheError>
    where
        I: IntoIterator<Item = String>,
    {
        for key in keys {
            self.invalidate(&key).await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Accelerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accelerator").field("ttl", &self.ttl).finish()
    }
}
