//! Playlist activity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// What happened to a song in a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ActivityAction {
    Add,
    Delete,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
        }
    }
}

/// Activity entry ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistActivity {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ActivityRow {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    /// Unix milliseconds.
    pub time: i64,
}

impl TryFrom<ActivityRow> for PlaylistActivity {
    type Error = CatalogError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let time = DateTime::from_timestamp_millis(row.time).ok_or_else(|| {
            CatalogError::invariant(format!("Activity timestamp {} is out of range", row.time))
        })?;
        Ok(Self {
            username: row.username,
            title: row.title,
            action: row.action,
            time,
        })
    }
}
