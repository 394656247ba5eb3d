//! User repository.
//!
//! Users are created by the registration flow and referenced by id from
//! collaborations, likes and activities, and by username from playlists.

use tracing::debug;

use crate::database::Database;
use crate::database::models::User;
use crate::error::{CatalogError, expect_rows};
use crate::utils::generate_id;
use crate::Result;

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Register a user, returning the new id.
    ///
    /// Fails with `Client` when the username is taken.
    pub async fn add_user(&self, username: &str, fullname: &str) -> Result<String> {
        if self.get_by_username(username).await?.is_some() {
            return Err(CatalogError::Client(format!("Username {username} is already taken")));
        }

        let id = generate_id("user");
        let result = sqlx::query("INSERT INTO users (id, username, fullname) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(username)
            .bind(fullname)
            .execute(self.db.pool())
            .await
            .map_err(|e| CatalogError::on_conflict(e, "Username is already taken"))?;

        expect_rows(result.rows_affected(), || CatalogError::invariant("User could not be added"))?;
        debug!("Added user {} (@{})", id, username);
        Ok(id)
    }

    /// Get user by ID.
    pub async fn get_by_id(&self, user_id: &str) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT id, username, fullname FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| CatalogError::not_found("User not found"))
    }

    /// Get user by exact username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, fullname FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(user)
    }

    /// Resolve a username to its stable id.
    pub async fn resolve_id(&self, username: &str) -> Result<String> {
        self.get_by_username(username)
            .await?
            .map(|user| user.id)
            .ok_or_else(|| CatalogError::not_found("User not found"))
    }

    /// Users whose username contains `fragment` (case-insensitive).
    pub async fn search(&self, fragment: &str) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, fullname FROM users WHERE instr(lower(username), lower(?)) > 0 ORDER BY username",
        )
        .bind(fragment)
        .fetch_all(self.db.pool())
        .await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn add_and_fetch_user() {
        let db = testing::database().await;
        let users = UserRepository::new(&db);

        let id = users.add_user("alice", "Alice Liddell").await.unwrap();
        assert!(id.starts_with("user-"));

        let user = users.get_by_id(&id).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(users.resolve_id("alice").await.unwrap(), id);
    }

    #[tokio::test]
    async fn duplicate_username_is_client_error() {
        let db = testing::database().await;
        let users = UserRepository::new(&db);

        users.add_user("alice", "Alice").await.unwrap();
        let err = users.add_user("alice", "Other Alice").await.unwrap_err();
        assert!(matches!(err, CatalogError::Client(_)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let db = testing::database().await;
        let users = UserRepository::new(&db);

        assert!(matches!(users.get_by_id("user-x").await, Err(CatalogError::NotFound(_))));
        assert!(matches!(users.resolve_id("ghost").await, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn search_matches_fragment() {
        let db = testing::database().await;
        let users = UserRepository::new(&db);
        users.add_user("alice", "Alice").await.unwrap();
        users.add_user("malice", "Mal").await.unwrap();
        users.add_user("bob", "Bob").await.unwrap();

        let found: Vec<_> = users.search("ALI").await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(found, ["alice", "malice"]);
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let db = testing::database().await;
        let users = UserRepository::new(&db);
        users.add_user("axb", "X").await.unwrap();
        users.add_user("a_b", "Underscore").await.unwrap();
        users.add_user("100%", "Percent").await.unwrap();

        let found: Vec<_> = users.search("a_b").await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(found, ["a_b"]);
        let found: Vec<_> = users.search("%").await.unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(found, ["100%"]);
    }

    #[tokio::test]
    async fn removing_a_user_cascades_to_everything_they_own() {
        let fx = testing::Fixture::new().await;
        let alice = fx.user("alice").await;
        let bob = fx.user("bob").await;
        let playlist = fx.playlist("alice", "Road Trip").await;
        let song = fx.song("Yellow").await;
        let album = fx.album("Viva la Vida").await;
        let pool = fx.db.pool();

        fx.catalog.collaborations.add_collaboration(&playlist, &bob).await.unwrap();
        fx.catalog.playlists.add_song_to_playlist(&playlist, &song, &bob).await.unwrap();
        fx.catalog.albums.add_album_like(&bob, &album).await.unwrap();
        fx.catalog.albums.add_album_like(&alice, &album).await.unwrap();

        let count = |sql: &'static str, id: String| async move {
            sqlx::query_scalar::<_, i64>(sql).bind(id).fetch_one(pool).await.unwrap()
        };

        sqlx::query("DELETE FROM users WHERE id = ?").bind(&bob).execute(pool).await.unwrap();
        assert_eq!(count("SELECT COUNT(*) FROM collaborations WHERE user_id = ?", bob.clone()).await, 0);
        assert_eq!(count("SELECT COUNT(*) FROM playlist_activities WHERE user_id = ?", bob.clone()).await, 0);
        assert_eq!(count("SELECT COUNT(*) FROM user_album_likes WHERE user_id = ?", bob.clone()).await, 0);
        assert_eq!(count("SELECT COUNT(*) FROM user_album_likes WHERE user_id = ?", alice.clone()).await, 1);
        assert_eq!(count("SELECT COUNT(*) FROM playlists WHERE id = ?", playlist.clone()).await, 1);

        sqlx::query("DELETE FROM users WHERE id = ?").bind(&alice).execute(pool).await.unwrap();
        assert_eq!(count("SELECT COUNT(*) FROM playlists WHERE id = ?", playlist.clone()).await, 0);
        assert_eq!(count("SELECT COUNT(*) FROM playlist_songs WHERE playlist_id = ?", playlist.clone()).await, 0);
        assert_eq!(count("SELECT COUNT(*) FROM user_album_likes WHERE user_id = ?", alice.clone()).await, 0);
        fx.catalog.songs.verify_song(&song).await.unwrap();
        fx.catalog.albums.get_album_by_id(&album).await.unwrap();
    }
}
