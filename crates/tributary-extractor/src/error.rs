//! Error types for the Extractor

use thiserror::Error;
use tributary_index::IndexError;

/// Errors that abort an extraction run
///
/// Identity resolution failures are not here: they degrade to unresolved
/// candidates and never fail a run.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Scorer returned a different number of probabilities than candidates
    #[error("Scorer contract violation: expected {expected} probabilities, got {actual}")]
    ScorerContract {
        /// Candidates supplied
        expected: usize,
        /// Probabilities returned
        actual: usize,
    },

    /// Scorer returned a value outside [0, 1]
    #[error("Scorer returned invalid probability {value} at position {index}")]
    InvalidProbability {
        /// Position in the batch
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Scorer backend failed
    #[error("Scorer error: {0}")]
    Scorer(String),

    /// Variant index could not be built
    #[error("Index error: {0}")]
    Index(String),

    /// Claim store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<IndexError> for ExtractorError {
    fn from(e: IndexError) -> Self {
        ExtractorError::Index(e.to_string())
    }
}

impl ExtractorError {
    /// True for scorer contract violations
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ExtractorError::ScorerContract { .. } | ExtractorError::InvalidProbability { .. }
        )
    }
}
