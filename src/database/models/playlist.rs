//! Playlist models.

use serde::{Deserialize, Serialize};

use super::SongSummary;

/// Playlist as shown in a user's listing. `username` is the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Playlist with its member songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSongs {
    pub id: String,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

/// One row of the playlist/membership/song left join.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PlaylistSongRow {
    pub id: String,
    pub name: String,
    pub username: String,
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub performer: Option<String>,
}

impl PlaylistSongs {
    /// Assemble joined rows. Returns `None` for an empty row set.
    pub(crate) fn from_rows(rows: Vec<PlaylistSongRow>) -> Option<Self> {
        let first = rows.first()?;
        let mut playlist = Self {
            id: first.id.clone(),
            name: first.name.clone(),
            username: first.username.clone(),
            songs: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            if let (Some(id), Some(title), Some(performer)) = (row.song_id, row.title, row.performer) {
                playlist.songs.push(SongSummary { id, title, performer });
            }
        }

        Some(playlist)
    }
}
