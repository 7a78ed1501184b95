//! Error types for the variant index

use thiserror::Error;

/// Errors that can occur while building or serving the index
#[derive(Error, Debug)]
pub enum IndexError {
    /// The roster data source failed to load
    #[error("Roster load error: {0}")]
    Roster(String),

    /// An index lock was poisoned by a panicking writer
    #[error("Index lock error: {0}")]
    Lock(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for index operations
pub type Result<T> = std::result::Result<T, IndexError>;
