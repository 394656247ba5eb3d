//! Album repository with cache-aside like counting.
//!
//! Album rows are read straight from the database; only the like count is
//! cached, under `albums:<album_id>`.

use tracing::debug;

use crate::cache::{Accelerator, album_likes_key};
use crate::database::Database;
use crate::database::models::{Album, AlbumSongRow, Sourced};
use crate::error::{CatalogError, expect_rows};
use crate::utils::generate_id;
use crate::Result;

#[derive(Debug, Clone)]
pub struct AlbumRepository {
    db: Database,
    cache: Accelerator,
}

impl AlbumRepository {
    pub fn new(db: &Database, cache: &Accelerator) -> Self {
        Self {
            db: db.clone(),
            cache: cache.clone(),
        }
    }

    pub async fn add_album(&self, name: &str, year: i32) -> Result<String> {
        let id = generate_id("album");
        let result = sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(year)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || CatalogError::invariant("Album could not be added"))?;
        debug!("Added album {} ({})", id, name);
        Ok(id)
    }

    pub async fn add_album_cover(&self, id: &str, cover_url: &str) -> Result<()> {
        let result = sqlx::query("UPDATE albums SET cover_url = ? WHERE id = ?")
            .bind(cover_url)
            .bind(id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Album cover could not be saved")
        })
    }

    /// Album with its songs; an album without songs has an empty list.
    pub async fn get_album_by_id(&self, id: &str) -> Result<Album> {
        let rows = sqlx::query_as::<_, AlbumSongRow>(
            r#"
            SELECT
                albums.id AS album_id,
                albums.name AS album_name,
                albums.year AS album_year,
                albums.cover_url AS album_cover_url,
                songs.id AS song_id,
                songs.title AS song_title,
                songs.performer AS song_performer
            FROM albums
            LEFT JOIN songs ON albums.id = songs.album_id
            WHERE albums.id = ?
            ORDER BY songs.title, songs.id
            "#,
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;

        Album::from_rows(rows).ok_or_else(|| CatalogError::not_found("Album not found"))
    }

    pub async fn edit_album_by_id(&self, id: &str, name: &str, year: i32) -> Result<()> {
        let result = sqlx::query("UPDATE albums SET name = ?, year = ? WHERE id = ?")
            .bind(name)
            .bind(year)
            .bind(id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Failed to update album. Id not found")
        })
    }

    /// Delete an album. Its songs stay, with their album reference cleared.
    pub async fn delete_album_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM albums WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Failed to delete album. Id not found")
        })?;

        // Likes cascade with the album.
        self.cache.invalidate(&album_likes_key(id)).await?;
        Ok(())
    }

    /// Fail with `Client` if the user already likes the album.
    pub async fn check_album_like(&self, user_id: &str, album_id: &str) -> Result<()> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM user_album_likes WHERE user_id = ? AND album_id = ?")
                .bind(user_id)
                .bind(album_id)
                .fetch_optional(self.db.pool())
                .await?;

        match existing {
            Some(_) => Err(CatalogError::Client("You already like this album".into())),
            None => Ok(()),
        }
    }

    pub async fn add_album_like(&self, user_id: &str, album_id: &str) -> Result<()> {
        let result = sqlx::query("INSERT INTO user_album_likes (user_id, album_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(album_id)
            .execute(self.db.pool())
            .await
            .map_err(|e| CatalogError::on_conflict(e, "You already like this album"))?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Album like could not be added")
        })?;

        self.cache.invalidate(&album_likes_key(album_id)).await?;
        Ok(())
    }

    pub async fn remove_album_like(&self, user_id: &str, album_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
            .bind(user_id)
            .bind(album_id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::not_found("Album like could not be removed")
        })?;

        self.cache.invalidate(&album_likes_key(album_id)).await?;
        Ok(())
    }

    pub async fn get_album_like_count(&self, album_id: &str) -> Result<Sourced<i64>> {
        let key = album_likes_key(album_id);

        if let Some(count) = self.cache.read::<i64>(&key).await {
            return Ok(Sourced::cache(count));
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_album_likes WHERE album_id = ?")
            .bind(album_id)
            .fetch_one(self.db.pool())
            .await?;

        self.cache.fill(&key, &count).await;
        Ok(Sourced::database(count))
    }
}
