//! Tributary Claim Scorers
//!
//! Implementations of the `ClaimScorer` trait from `tributary-domain`.
//!
//! # Scorers
//!
//! - `HeuristicScorer`: probability by cue strength, penalizing self-references
//! - `NullScorer`: certainty for every candidate
//! - `MockScorer`: scripted output for testing
//!
//! # Examples
//!
//! ```
//! use tributary_domain::traits::{ClaimScorer, ScoringContext};
//! use tributary_scorer::HeuristicScorer;
//!
//! let scorer = HeuristicScorer::default();
//! let ctx = ScoringContext {
//!     subject: "Radiohead".to_string(),
//!     influence_artist: "Can".to_string(),
//!     pattern_type: "strong".to_string(),
//!     snippet: "Radiohead were influenced by Can.".to_string(),
//! };
//! assert_eq!(scorer.score_batch(&[ctx]).unwrap(), vec![0.8]);
//! ```

#![warn(missing_docs)]

pub mod heuristic;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tributary_domain::traits::{ClaimScorer, ScoringContext};

pub use heuristic::{HeuristicConfig, HeuristicScorer};

/// Errors that can occur while scoring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScorerError {
    /// Scoring backend failed
    #[error("Scorer backend error: {0}")]
    Backend(String),

    /// Input could not be scored
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Scores every candidate as certain
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

impl ClaimScorer for NullScorer {
    type Error = ScorerError;

    fn score_batch(&self, contexts: &[ScoringContext]) -> Result<Vec<f64>, Self::Error> {
        Ok(vec![1.0; contexts.len()])
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Mock scorer for deterministic testing
///
/// Returns a fixed probability vector regardless of input, which makes it
/// easy to simulate a backend that returns the wrong number of results.
///
/// # Examples
///
/// ```
/// use tributary_domain::traits::ClaimScorer;
/// use tributary_scorer::MockScorer;
///
/// let scorer = MockScorer::fixed(vec![0.9, 0.1]);
/// assert_eq!(scorer.score_batch(&[]).unwrap(), vec![0.9, 0.1]);
/// assert_eq!(scorer.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockScorer {
    response: Result<Vec<f64>, ScorerError>,
    constant: Option<f64>,
    call_count: Arc<AtomicUsize>,
}

impl MockScorer {
    /// Always return `probabilities`
    pub fn fixed(probabilities: Vec<f64>) -> Self {
        Self {
            response: Ok(probabilities),
            constant: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return `probability` once per input
    pub fn constant(probability: f64) -> Self {
        Self {
            response: Ok(Vec::new()),
            constant: Some(probability),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with a backend error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(ScorerError::Backend(message.into())),
            constant: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `score_batch` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl ClaimScorer for MockScorer {
    type Error = ScorerError;

    fn score_batch(&self, contexts: &[ScoringContext]) -> Result<Vec<f64>, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(p) = self.constant {
            return Ok(vec![p; contexts.len()]);
        }
        self.response.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str) -> ScoringContext {
        ScoringContext {
            subject: "Subject".to_string(),
            influence_artist: name.to_string(),
            pattern_type: "weak".to_string(),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_null_scorer_matches_input_count() {
        let out = NullScorer.score_batch(&[ctx("a"), ctx("b"), ctx("c")]).unwrap();
        assert_eq!(out, vec![1.0, 1.0, 1.0]);
        assert!(NullScorer.score_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_mock_fixed_ignores_input_count() {
        let scorer = MockScorer::fixed(vec![0.5, 0.5]);
        assert_eq!(scorer.score_batch(&[ctx("a"), ctx("b"), ctx("c")]).unwrap().len(), 2);
    }

    #[test]
    fn test_mock_constant_follows_input_count() {
        let scorer = MockScorer::constant(0.4);
        assert_eq!(scorer.score_batch(&[ctx("a"), ctx("b")]).unwrap(), vec![0.4, 0.4]);
    }

    #[test]
    fn test_mock_failing_and_shared_count() {
        let scorer = MockScorer::failing("model offline");
        let clone = scorer.clone();
        assert!(matches!(clone.score_batch(&[ctx("a")]), Err(ScorerError::Backend(_))));
        assert_eq!(scorer.call_count(), 1);
    }
}
