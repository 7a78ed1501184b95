//! Error types for registry communication

use thiserror::Error;

/// Errors returned by an identity registry
///
/// None of these escape the resolver: every failure becomes a cached
/// negative result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Registry asked us to slow down
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status
    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RegistryError {
    /// Whether the failure is worth one immediate retry
    pub fn is_transient(&self) -> bool {
        matches!(self, RegistryError::Network(_))
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RegistryError::Timeout
        } else if e.is_decode() {
            RegistryError::Parse(e.to_string())
        } else {
            RegistryError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Parse(e.to_string())
    }
}
