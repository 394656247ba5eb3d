//! Song repository.
//!
//! Songs are not cached themselves, but their title and performer appear in
//! cached playlist listings, so edits and deletes invalidate every playlist
//! that contains the song.

use tracing::debug;

use crate::cache::{Accelerator, playlist_songs_key};
use crate::database::Database;
use crate::database::models::{NewSong, Song, SongFilter, SongSummary};
use crate::error::{CatalogError, expect_rows};
use crate::utils::generate_id;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SongRepository {
    db: Database,
    cache: Accelerator,
}

impl SongRepository {
    pub fn new(db: &Database, cache: &Accelerator) -> Self {
        Self {
            db: db.clone(),
            cache: cache.clone(),
        }
    }

    pub async fn add_song(&self, song: &NewSong) -> Result<String> {
        let id = generate_id("song");
        let result = sqlx::query(
            "INSERT INTO songs (id, title, year, genre, performer, duration, album_id) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&song.title)
        .bind(song.year)
        .bind(&song.genre)
        .bind(&song.performer)
        .bind(song.duration)
        .bind(&song.album_id)
        .execute(self.db.pool())
        .await?;

        expect_rows(result.rows_affected(), || CatalogError::invariant("Song could not be added"))?;
        debug!("Added song {} ({})", id, song.title);
        Ok(id)
    }

    pub async fn get_songs(&self, filter: &SongFilter) -> Result<Vec<SongSummary>> {
        let songs = sqlx::query_as::<_, SongSummary>(
            r#"
            SELECT id, title, performer FROM songs
            WHERE (?1 IS NULL OR instr(lower(title), lower(?1)) > 0)
              AND (?2 IS NULL OR instr(lower(performer), lower(?2)) > 0)
            ORDER BY title, id
            "#,
        )
        .bind(&filter.title)
        .bind(&filter.performer)
        .fetch_all(self.db.pool())
        .await?;
        Ok(songs)
    }

    pub async fn get_song_by_id(&self, id: &str) -> Result<Song> {
        sqlx::query_as::<_, Song>(
            "SELECT id, title, year, genre, performer, duration, album_id FROM songs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| CatalogError::not_found("Song not found"))
    }

    /// Fail with `NotFound` unless the song exists.
    pub async fn verify_song(&self, id: &str) -> Result<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match exists {
            Some(_) => Ok(()),
            None => Err(CatalogError::not_found("Song not found")),
        }
    }

    pub async fn edit_song_by_id(&self, id: &str, song: &NewSong) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE songs
            SET title = ?, year = ?, genre = ?, performer = ?, duration = ?, album_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&song.title)
        .bind(song.year)
        .bind(&song.genre)
        .bind(&song.performer)
        .bind(song.duration)
        .bind(&song.album_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Failed to update song. Id not found")
        })?;

        let playlists = sqlx::query_scalar::<_, String>("SELECT playlist_id FROM playlist_songs WHERE song_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        self.cache
            .invalidate_all(playlists.iter().map(|p| playlist_songs_key(p)))
            .await?;
        Ok(())
    }

    /// Delete a song. Its playlist memberships and activities cascade; the
    /// album it belonged to is untouched.
    pub async fn delete_song_by_id(&self, id: &str) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        // Memberships go first so the write lock covers the playlists returned.
        let playlists = sqlx::query_scalar::<_, String>(
            "DELETE FROM playlist_songs WHERE song_id = ? RETURNING playlist_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Failed to delete song. Id not found")
        })?;
        tx.commit().await?;
        debug!("Deleted song {} from {} playlists", id, playlists.len());

        self.cache
            .invalidate_all(playlists.iter().map(|p| playlist_songs_key(p)))
            .await?;
        Ok(())
    }
}
