//! OpenMusic catalog service.
//!
//! Opens the process-wide resources (database pool and accelerator), wires the
//! catalog, and holds them until shutdown.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use openmusic::Catalog;
use openmusic::cache::{Accelerator, MemoryCache};
use openmusic::config::Config;
use openmusic::database::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("openmusic=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting OpenMusic catalog...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");

    info!("Connecting to {}...", config.database_url);
    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    info!("Database connected");

    let store = Arc::new(MemoryCache::new("accelerator", &config.cache));
    let accelerator = Accelerator::new(store, config.cache.ttl);
    info!(
        "Accelerator initialized (capacity {}, ttl {:?})",
        config.cache.max_capacity, config.cache.ttl
    );

    // Handlers are mounted by the transport layer against this catalog.
    let catalog = Catalog::new(&db, &accelerator);
    info!("Catalog ready");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");

    drop(catalog);
    db.close().await;

    Ok(())
}
