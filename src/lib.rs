//! OpenMusic - cache-coherent catalog core.
//!
//! Data access for albums, songs and collaborative playlists, fronted by a
//! cache-aside accelerator and an append-only playlist activity log.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Accelerator contract, Moka-backed store, cache-aside helpers
//! - `database` - SQLite pool, schema, typed models and repositories
//! - `permissions` - Owner/collaborator access checks for playlists
//! - `catalog` - Everything wired together against one pool and one cache
//! - `utils` - Id generation
//!
//! Transport, request validation, uploads and authentication live outside
//! this crate; they call into [`Catalog`] and map [`ErrorKind`] to statuses.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod permissions;
pub mod utils;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use error::{CatalogError, ErrorKind, Result};
