//! The assembled catalog core.

use crate::cache::Accelerator;
use crate::database::{
    AlbumRepository, CollaborationRepository, Database, PlaylistRepository, SongRepository,
    UserRepository,
};
use crate::permissions::PlaylistAuthority;

/// Every component wired against one pool and one accelerator.
///
/// Cloning is cheap; all clones share the same pool and cache.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub users: UserRepository,
    pub songs: SongRepository,
    pub albums: AlbumRepository,
    pub playlists: PlaylistRepository,
    pub collaborations: CollaborationRepository,
    pub authority: PlaylistAuthority,
}

impl Catalog {
    pub fn new(db: &Database, accelerator: &Accelerator) -> Self {
        let collaborations = CollaborationRepository::new(db, accelerator);
        Self {
            users: UserRepository::new(db),
            songs: SongRepository::new(db, accelerator),
            albums: AlbumRepository::new(db, accelerator),
            playlists: PlaylistRepository::new(db, accelerator),
            authority: PlaylistAuthority::new(db, &collaborations),
            collaborations,
        }
    }
}
