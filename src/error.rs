//! Error types for the catalog core.

use thiserror::Error;

use crate::cache::CacheError;

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Coarse classification used by the transport layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Invariant,
    Authorization,
    Client,
    Internal,
}

/// Errors raised by the catalog core.
///
/// The first four variants are the domain taxonomy; the rest wrap
/// infrastructure failures and are passed through unchanged.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Referenced entity is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write affected zero rows when at least one was expected.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Caller lacks rights over an existing resource.
    #[error("Forbidden: {0}")]
    Authorization(String),

    /// The request itself broke a domain rule (e.g. duplicate like).
    #[error("Rejected: {0}")]
    Client(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache invalidation failed after a committed mutation.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Invariant(_) => ErrorKind::Invariant,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::Client(_) => ErrorKind::Client,
            Self::Database(_) | Self::Cache(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }

    /// Map a unique-constraint violation to [`CatalogError::Client`],
    /// leaving every other database error untouched.
    pub(crate) fn on_conflict(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Client(message.to_string()),
            _ => Self::Database(err),
        }
    }
}

/// Fail with `error` when a write touched no rows.
pub(crate) fn expect_rows(rows_affected: u64, error: impl FnOnce() -> CatalogError) -> Result<()> {
    if rows_affected == 0 {
        return Err(error());
    }
    Ok(())
}
