//! Repository module - data access layer over the relational store.

mod activity_log;
mod album_repository;
mod collaboration_repository;
mod playlist_repository;
mod song_repository;
mod user_repository;

pub use activity_log::ActivityLog;
pub use album_repository::AlbumRepository;
pub use collaboration_repository::CollaborationRepository;
pub use playlist_repository::PlaylistRepository;
pub use song_repository::SongRepository;
pub use user_repository::UserRepository;
