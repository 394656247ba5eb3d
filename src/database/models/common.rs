//! Common shared models.

use serde::{Deserialize, Serialize};

/// Where a cache-aside read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Database,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read result tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn cache(data: T) -> Self {
        Self {
            data,
            source: Source::Cache,
        }
    }

    pub fn database(data: T) -> Self {
        Self {
            data,
            source: Source::Database,
        }
    }

    pub fn is_cached(&self) -> bool {
        self.source == Source::Cache
    }
}
