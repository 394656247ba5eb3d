//! Playlist access checks.

use tracing::{debug, warn};

use crate::Result;
use crate::database::{CollaborationRepository, Database};
use crate::error::CatalogError;

/// Why access to a playlist was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Owner,
    Collaborator,
}

/// Resolves whether a user may act on a playlist.
#[derive(Debug, Clone)]
pub struct PlaylistAuthority {
    db: Database,
    collaborations: CollaborationRepository,
}

impl PlaylistAuthority {
    pub fn new(db: &Database, collaborations: &CollaborationRepository) -> Self {
        Self {
            db: db.clone(),
            collaborations: collaborations.clone(),
        }
    }

    /// Succeed only if `user_id` owns the playlist.
    ///
    /// Fails with `NotFound` if the playlist (checked first) or the user does
    /// not exist, and with `Authorization` if someone else owns it.
    pub async fn verify_owner(&self, playlist_id: &str, user_id: &str) -> Result<()> {
        let owner: Option<String> = sqlx::query_scalar("SELECT owner FROM playlists WHERE id = ?")
            .bind(playlist_id)
            .fetch_optional(self.db.pool())
            .await?;
        let owner = owner.ok_or_else(|| CatalogError::not_found("Playlist not found"))?;

        let username: Option<String> = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;
        let username = username.ok_or_else(|| CatalogError::not_found("User not found"))?;

        if owner != username {
            return Err(CatalogError::Authorization(
                "You are not allowed to access this playlist".into(),
            ));
        }
        Ok(())
    }

    /// Succeed if `user_id` owns the playlist or collaborates on it.
    ///
    /// Rules are evaluated in order:
    /// 1. ownership; a missing playlist or user is final
    /// 2. collaboration, only when the user exists but is not the owner
    ///
    /// A failed collaboration check reports the ownership denial, never its
    /// own error.
    pub async fn verify_access(&self, playlist_id: &str, user_id: &str) -> Result<AccessDecision> {
        let denial = match self.verify_owner(playlist_id, user_id).await {
            Ok(()) => return Ok(AccessDecision::Owner),
            Err(e @ CatalogError::Authorization(_)) => e,
            Err(e) => return Err(e),
        };

        match self.collaborations.is_collaborator(playlist_id, user_id).await {
            Ok(true) => {
                debug!("User {} collaborates on {}", user_id, playlist_id);
                Ok(AccessDecision::Collaborator)
            }
            Ok(false) => Err(denial),
            Err(e) => {
                warn!("Collaborator lookup for {} on {} failed: {}", user_id, playlist_id, e);
                Err(denial)
            }
        }
    }
}
