//! Identity registry trait

use crate::error::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search hit from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMatch {
    /// Registry identifier
    pub id: String,
    /// Registry display name
    pub name: String,
    /// Match confidence, 0-100
    pub score: u32,
}

impl ArtistMatch {
    /// Create a search hit
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
        }
    }
}

/// External music-metadata registry
///
/// Implementations perform exactly one outbound call per method call.
/// Rate limiting, retry and caching are the resolver's job.
#[async_trait]
pub trait IdentityRegistry: Send + Sync {
    /// Search artists by name, best match first
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistMatch>, RegistryError>;

    /// Display name for an identifier; `Ok(None)` when the id is unknown
    async fn lookup_artist(&self, id: &str) -> Result<Option<String>, RegistryError>;
}
