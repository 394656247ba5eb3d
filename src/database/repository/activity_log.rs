//! Append-only audit trail of playlist song changes.
//!
//! There is deliberately no update or delete: entries only disappear through
//! the cascade when their playlist, user or song is removed.

use chrono::Utc;
use tracing::debug;

use crate::database::Database;
use crate::database::models::{ActivityAction, ActivityRow, PlaylistActivity};
use crate::error::{CatalogError, expect_rows};
use crate::Result;

#[derive(Debug, Clone)]
pub struct ActivityLog {
    db: Database,
}

impl ActivityLog {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// Record one event, stamped with the current time.
    pub async fn append(
        &self,
        playlist_id: &str,
        user_id: &str,
        song_id: &str,
        action: ActivityAction,
    ) -> Result<()> {
        let result = sqlx::query(
            "INSERT INTO playlist_activities (playlist_id, user_id, song_id, action, time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(playlist_id)
        .bind(user_id)
        .bind(song_id)
        .bind(action)
        .bind(Utc::now().timestamp_millis())
        .execute(self.db.pool())
        .await?;

        expect_rows(result.rows_affected(), || {
            CatalogError::invariant("Playlist activity could not be recorded")
        })?;
        debug!("Logged {} of {} in {} by {}", action.as_str(), song_id, playlist_id, user_id);
        Ok(())
    }

    /// All entries of a playlist, oldest first.
    pub async fn read(&self, playlist_id: &str) -> Result<Vec<PlaylistActivity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT users.username, songs.title, a.action, a.time
            FROM playlist_activities a
            JOIN users ON a.user_id = users.id
            JOIN songs ON a.song_id = songs.id
            WHERE a.playlist_id = ?
            ORDER BY a.time, a.id
            "#,
        )
        .bind(playlist_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.into_iter().map(PlaylistActivity::try_from).collect()
    }
}
