//! Database module exports.

pub mod models;
pub mod repository;
mod schema;
mod sqlite;

pub use models::*;
pub use repository::{
    ActivityLog, AlbumRepository, CollaborationRepository, PlaylistRepository, SongRepository,
    UserRepository,
};
pub use schema::run_migrations;
pub use sqlite::Database;
