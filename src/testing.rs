//! Shared test fixtures.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::Catalog;
use crate::cache::{Accelerator, CacheConfig, CacheError, CacheLookup, CacheStore, DEFAULT_TTL, MemoryCache};
use crate::database::{Database, NewSong};

pub async fn database() -> Database {
    Database::in_memory().await.expect("in-memory database")
}

pub fn new_song(title: &str) -> NewSong {
    NewSong {
        title: title.to_string(),
        year: 2008,
        genre: "Pop".to_string(),
        performer: "Coldplay".to_string(),
        duration: Some(240),
        album_id: None,
    }
}

/// Memory cache that can be told to act unreachable or to fail deletes.
#[derive(Debug)]
pub struct ToggleCache {
    inner: MemoryCache,
    unreachable: AtomicBool,
    failing_deletes: AtomicBool,
}

impl Default for ToggleCache {
    fn default() -> Self {
        Self {
            inner: MemoryCache::new("toggle", &CacheConfig::default()),
            unreachable: AtomicBool::new(false),
            failing_deletes: AtomicBool::new(false),
        }
    }
}

impl ToggleCache {
    pub fn set_unreachable(&self, value: bool) {
        self.unreachable.store(value, Ordering::SeqCst);
    }

    pub fn set_failing_deletes(&self, value: bool) {
        self.failing_deletes.store(value, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CacheError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for ToggleCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheError> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.check()?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check()?;
        if self.failing_deletes.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("delete timed out".into()));
        }
        self.inner.delete(key).await
    }
}

/// Fresh database, accelerator and catalog per test.
pub struct Fixture {
    pub db: Database,
    pub cache: Arc<ToggleCache>,
    pub catalog: Catalog,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL).await
    }

    pub async fn with_ttl(ttl: Duration) -> Self {
        let db = database().await;
        let cache = Arc::new(ToggleCache::default());
        let accelerator = Accelerator::new(cache.clone(), ttl);
        let catalog = Catalog::new(&db, &accelerator);
        Self { db, cache, catalog }
    }

    /// Register a user, returning its id.
    pub async fn user(&self, username: &str) -> String {
        self.catalog
            .users
            .add_user(username, &format!("{username} fullname"))
            .await
            .expect("add user")
    }

    /// Create a playlist owned by `owner` (a username), returning its id.
    pub async fn playlist(&self, owner: &str, name: &str) -> String {
        self.catalog.playlists.add_playlist(name, owner).await.expect("add playlist")
    }

    pub async fn song(&self, title: &str) -> String {
        self.catalog.songs.add_song(&new_song(title)).await.expect("add song")
    }

    pub async fn album(&self, name: &str) -> String {
        self.catalog.albums.add_album(name, 2005).await.expect("add album")
    }
}
