//! Album models.

use serde::{Deserialize, Serialize};

use super::SongSummary;

/// Album with the songs that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub cover_url: Option<String>,
    pub songs: Vec<SongSummary>,
}

/// One row of the album/song left join.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct AlbumSongRow {
    pub album_id: String,
    pub album_name: String,
    pub album_year: i32,
    pub album_cover_url: Option<String>,
    pub song_id: Option<String>,
    pub song_title: Option<String>,
    pub song_performer: Option<String>,
}

impl Album {
    /// Group joined rows into one album. Returns `None` for an empty row set.
    pub(crate) fn from_rows(rows: Vec<AlbumSongRow>) -> Option<Self> {
        let first = rows.first()?;
        let mut album = Self {
            id: first.album_id.clone(),
            name: first.album_name.clone(),
            year: first.album_year,
            cover_url: first.album_cover_url.clone(),
            songs: Vec::with_capacity(rows.len()),
        };

        for row in rows {
            if let (Some(id), Some(title), Some(performer)) =
                (row.song_id, row.song_title, row.song_performer)
            {
                album.songs.push(SongSummary { id, title, performer });
            }
        }

        Some(album)
    }
}
