//! Configuration module for the catalog service.
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://openmusic.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Relational store
    pub database_url: String,
    pub database_max_connections: u32,

    // Accelerator
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unparsable values fall back to the default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let cache = CacheConfig::with_capacity(parse_var(
            "CACHE_MAX_CAPACITY",
            defaults.cache.max_capacity,
        ))
        .ttl(Duration::from_secs(parse_var(
            "CACHE_TTL_SECS",
            defaults.cache.ttl.as_secs(),
        )));

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            cache,
        }
    }
}

fn parse_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_sqlite() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.cache.ttl, Duration::from_secs(1800));
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(parse_var("OPENMUSIC_TEST_SURELY_UNSET", 42u32), 42);
    }
}
