//! Collaboration repository.
//!
//! A collaboration makes a playlist show up in the collaborator's listing,
//! so both mutations invalidate `playlists:<user_id>`.

use tracing::debug;

use crate::cache::{Accelerator, playlists_key};
use crate::database::Database;
use crate::error::{CatalogError, expect_rows};
use crate::utils::generate_id;
use crate::Result;

#[derive(Debug, Clone)]
pub struct CollaborationRepository {
    db: Database,
    cache: Accelerator,
}

impl CollaborationRepository {
    pub fn new(db: &Database, cache: &Accelerator) -> Self {
        Self {
            db: db.clone(),
            cache: cache.clone(),
        }
    }

    /// Grant `user_id` access to a playlist. Fails with `Client` if already granted.
    pub async fn add_collaboration(&self, playlist_id: &str, user_id: &str) -> Result<String> {
        let id = generate_id("collab");
        let result = sqlx::query("INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(playlist_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await
            .map_err(|e| CatalogError::on_conflict(e, "User is already a collaborator"))?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Collaboration could not be added")
        })?;
        debug!("User {} now collaborates on {}", user_id, playlist_id);

        self.cache.invalidate(&playlists_key(user_id)).await?;
        Ok(id)
    }

    pub async fn delete_collaboration(&self, playlist_id: &str, user_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
            .bind(playlist_id)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Collaboration could not be removed")
        })?;

        self.cache.invalidate(&playlists_key(user_id)).await?;
        Ok(())
    }

    pub async fn is_collaborator(&self, playlist_id: &str, user_id: &str) -> Result<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM collaborations WHERE playlist_id = ? AND user_id = ?")
                .bind(playlist_id)
                .bind(user_id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(found.is_some())
    }

    /// Ids of every collaborator on a playlist.
    pub async fn collaborators(&self, playlist_id: &str) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>("SELECT user_id FROM collaborations WHERE playlist_id = ?")
            .bind(playlist_id)
            .fetch_all(self.db.pool())
            .await?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Source;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn add_and_remove_collaborator() {
        let fx = Fixture::new().await;
        fx.user("alice").await;
        let bob = fx.user("bob").await;
        let playlist = fx.playlist("alice", "Road Trip").await;
        let collaborations = &fx.catalog.collaborations;

        let id = collaborations.add_collaboration(&playlist, &bob).await.unwrap();
        assert!(id.starts_with("collab-"));
        assert!(collaborations.is_collaborator(&playlist, &bob).await.unwrap());
        assert_eq!(collaborations.collaborators(&playlist).await.unwrap(), [bob.clone()]);

        collaborations.delete_collaboration(&playlist, &bob).await.unwrap();
        assert!(!collaborations.is_collaborator(&playlist, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_collaboration_is_client_error() {
        let fx = Fixture::new().await;
        fx.user("alice").await;
        let bob = fx.user("bob").await;
        let playlist = fx.playlist("alice", "Road Trip").await;
        let collaborations = &fx.catalog.collaborations;

        collaborations.add_collaboration(&playlist, &bob).await.unwrap();
        assert!(matches!(
            collaborations.add_collaboration(&playlist, &bob).await,
            Err(CatalogError::Client(_))
        ));
    }

    #[tokio::test]
    async fn removing_missing_collaboration_is_invariant() {
        let fx = Fixture::new().await;
        fx.user("alice").await;
        let bob = fx.user("bob").await;
        let playlist = fx.playlist("alice", "Road Trip").await;

        assert!(matches!(
            fx.catalog.collaborations.delete_collaboration(&playlist, &bob).await,
            Err(CatalogError::Invariant(_))
        ));
    }

    #[tokio::test]
    async fn collaboration_changes_refresh_collaborator_listing() {
        let fx = Fixture::new().await;
        fx.user("alice").await;
        let bob = fx.user("bob").await;
        let playlist = fx.playlist("alice", "Road Trip").await;
        let playlists = &fx.catalog.playlists;

        assert!(playlists.list_playlists("bob").await.unwrap().data.is_empty());
        assert!(playlists.list_playlists("bob").await.unwrap().is_cached());

        fx.catalog.collaborations.add_collaboration(&playlist, &bob).await.unwrap();
        let listing = playlists.list_playlists("bob").await.unwrap();
        assert_eq!(listing.source, Source::Database);
        assert_eq!(listing.data.len(), 1);
        assert_eq!(listing.data[0].username, "alice");

        fx.catalog.collaborations.delete_collaboration(&playlist, &bob).await.unwrap();
        let listing = playlists.list_playlists("bob").await.unwrap();
        assert_eq!(listing.source, Source::Database);
        assert!(listing.data.is_empty());
    }
}
