//! Cache module - the accelerator in front of the relational store.
//!
//! ## Architecture
//!
//! - `CacheStore` - three-operation accelerator contract (get/set/delete)
//! - `MemoryCache` - Moka-backed implementation with per-entry expiry
//! - `Accelerator` - cache-aside helpers and key layout used by the catalogs
//!
//! ## Usage
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryCache::new("accelerator", &CacheConfig::default()));
//! let accelerator = Accelerator::new(store, CacheConfig::default().ttl);
//!
//! if let Some(count) = accelerator.read::<i64>(&album_likes_key(album_id)).await {
//!     // served from cache
//! }
//! ```

mod accelerator;
mod config;
mod memory;
mod store;

pub use accelerator::{Accelerator, album_likes_key, playlist_songs_key, playlists_key};
pub use config::{CacheConfig, DEFAULT_TTL};
pub use memory::MemoryCache;
pub use store::{CacheError, CacheLookup, CacheStore};
