//! Playlist repository with cache-aside listings.
//!
//! Two keys are maintained:
//! - `playlists:<user_id>` - playlists a user owns or collaborates on
//! - `playlistSongs:<playlist_id>` - a playlist with its member songs
//!
//! Every mutation commits first, then records activity where applicable,
//! then invalidates. Deletes read the keys to invalidate inside the same
//! transaction as the delete. A failure after the commit leaves the old entry
//! readable until its TTL runs out.

use tracing::debug;

use super::{ActivityLog, UserRepository};
use crate::cache::{Accelerator, playlist_songs_key, playlists_key};
use crate::database::Database;
use crate::database::models::{
    ActivityAction, PlaylistActivity, PlaylistSongRow, PlaylistSongs, PlaylistSummary, Sourced,
};
use crate::error::{CatalogError, expect_rows};
use crate::utils::generate_id;
use crate::Result;

#[derive(Debug, Clone)]
pub struct PlaylistRepository {
    db: Database,
    cache: Accelerator,
    users: UserRepository,
    activities: ActivityLog,
}

impl PlaylistRepository {
    pub fn new(db: &Database, cache: &Accelerator) -> Self {
        Self {
            db: db.clone(),
            cache: cache.clone(),
            users: UserRepository::new(db),
            activities: ActivityLog::new(db),
        }
    }

    /// Create a playlist owned by `owner` (a username). Returns the new id.
    pub async fn add_playlist(&self, name: &str, owner: &str) -> Result<String> {
        let owner_id = self.users.resolve_id(owner).await?;

        let id = generate_id("playlist");
        let result = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(owner)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Playlist could not be added")
        })?;
        debug!("Added playlist {} for @{}", id, owner);

        self.cache.invalidate(&playlists_key(&owner_id)).await?;
        Ok(id)
    }

    /// Playlists owned by or shared with `owner` (a username).
    ///
    /// Cached under the user's id, which never changes, rather than the name.
    pub async fn list_playlists(&self, owner: &str) -> Result<Sourced<Vec<PlaylistSummary>>> {
        let user_id = self.users.resolve_id(owner).await?;
        let key = playlists_key(&user_id);

        if let Some(playlists) = self.cache.read(&key).await {
            return Ok(Sourced::cache(playlists));
        }

        let playlists = sqlx::query_as::<_, PlaylistSummary>(
            r#"
            SELECT playlists.id, playlists.name, playlists.owner AS username
            FROM playlists
            LEFT JOIN collaborations ON collaborations.playlist_id = playlists.id
            WHERE playlists.owner = ? OR collaborations.user_id = ?
            GROUP BY playlists.id
            ORDER BY playlists.name, playlists.id
            "#,
        )
        .bind(owner)
        .bind(&user_id)
        .fetch_all(self.db.pool())
        .await?;

        self.cache.fill(&key, &playlists).await;
        Ok(Sourced::database(playlists))
    }

    /// Delete a playlist along with its memberships, collaborations and
    /// activities. The owner's and every collaborator's listing is invalidated.
    pub async fn delete_playlist_by_id(&self, id: &str) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        // Collaborations go first so the write lock covers the users returned.
        let collaborators = sqlx::query_scalar::<_, String>(
            "DELETE FROM collaborations WHERE playlist_id = ? RETURNING user_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let owner_id: Option<String> = sqlx::query_scalar(
            "SELECT users.id FROM playlists JOIN users ON users.username = playlists.owner WHERE playlists.id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let owner_id = owner_id.ok_or_else(|| CatalogError::not_found("Failed to delete playlist. Id not found"))?;

        let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Failed to delete playlist. Id not found")
        })?;
        tx.commit().await?;
        debug!("Deleted playlist {} with {} collaborators", id, collaborators.len());

        let keys = std::iter::once(owner_id)
            .chain(collaborators)
            .map(|user_id| playlists_key(&user_id))
            .chain(std::iter::once(playlist_songs_key(id)));
        self.cache.invalidate_all(keys).await?;
        Ok(())
    }

    /// Add a song to a playlist and log it.
    ///
    /// Access is the caller's responsibility (see
    /// [`PlaylistAuthority::verify_access`](crate::permissions::PlaylistAuthority::verify_access)).
    /// Fails with `NotFound` when the playlist or the song does not exist and
    /// with `Client` when the song is already in the playlist.
    pub async fn add_song_to_playlist(&self, playlist_id: &str, song_id: &str, user_id: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO playlist_songs (playlist_id, song_id)
            SELECT playlists.id, songs.id FROM playlists, songs
            WHERE playlists.id = ? AND songs.id = ?
            "#,
        )
        .bind(playlist_id)
        .bind(song_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| CatalogError::on_conflict(e, "Song is already in the playlist"))?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Song could not be added to the playlist")
        })?;

        self.activities
            .append(playlist_id, user_id, song_id, ActivityAction::Add)
            .await?;
        self.cache.invalidate(&playlist_songs_key(playlist_id)).await?;
        Ok(())
    }

    /// Playlist with its member songs.
    pub async fn get_songs_from_playlist(&self, playlist_id: &str) -> Result<Sourced<PlaylistSongs>> {
        let key = playlist_songs_key(playlist_id);

        if let Some(playlist) = self.cache.read(&key).await {
            return Ok(Sourced::cache(playlist));
        }

        let rows = sqlx::query_as::<_, PlaylistSongRow>(
            r#"
            SELECT
                playlists.id,
                playlists.name,
                playlists.owner AS username,
                songs.id AS song_id,
                songs.title,
                songs.performer
            FROM playlists
            LEFT JOIN playlist_songs ON playlist_songs.playlist_id = playlists.id
            LEFT JOIN songs ON playlist_songs.song_id = songs.id
            WHERE playlists.id = ?
            ORDER BY songs.title, songs.id
            "#,
        )
        .bind(playlist_id)
        .fetch_all(self.db.pool())
        .await?;

        let playlist = PlaylistSongs::from_rows(rows).ok_or_else(|| CatalogError::not_found("Playlist not found"))?;

        self.cache.fill(&key, &playlist).await;
        Ok(Sourced::database(playlist))
    }

    /// Remove a song from a playlist and log it.
    pub async fn delete_song_from_playlist(&self, playlist_id: &str, song_id: &str, user_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
            .bind(playlist_id)
            .bind(song_id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Song could not be removed from the playlist. Id not found")
        })?;

        self.activities
            .append(playlist_id, user_id, song_id, ActivityAction::Delete)
            .await?;
        self.cache.invalidate(&playlist_songs_key(playlist_id)).await?;
        Ok(())
    }

    /// Activity trail of a playlist, oldest first.
    ///
    /// An empty trail is reported as `NotFound`, even for an existing playlist.
    pub async fn get_playlist_activities(&self, playlist_id: &str) -> Result<Vec<PlaylistActivity>> {
        let activities = self.activities.read(playlist_id).await?;
        if activities.is_empty() {
            return Err(CatalogError::not_found("Playlist activities not found"));
        }
        Ok(activities)
    }
}
