//! SQLite connection pool wrapper.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use super::schema;
use crate::Result;

/// Pooled connection to the source of truth.
///
/// Built once at startup, cloned into every repository, and closed at
/// shutdown with [`Database::close`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool against `url` and bootstrap the schema.
    ///
    /// # Errors
    /// Returns error if the URL is invalid, the connection fails, or the
    /// schema cannot be created.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Connected to {} (max {} connections)", url, max_connections);

        schema::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Private in-memory database, mainly for tests and embedding.
    ///
    /// Held on a single connection that never idles out, since every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        schema::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Waits for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
