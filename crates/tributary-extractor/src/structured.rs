//! Knowledge-base "influenced by" triples as candidates

use serde::{Deserialize, Serialize};
use tributary_domain::{CandidateMethod, ExtractedCandidate};

/// Section path used for every structured candidate
pub const STRUCTURED_SECTION_PATH: &str = "wikidata:P737";

/// One "subject influenced by X" statement from a knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredInfluence {
    /// Knowledge-base entity id of the influencer (e.g. "Q1299")
    pub influencer_id: String,
    /// Human-readable label of the influencer
    pub influencer_label: String,
}

impl StructuredInfluence {
    /// Create a triple
    pub fn new(influencer_id: impl Into<String>, influencer_label: impl Into<String>) -> Self {
        Self {
            influencer_id: influencer_id.into(),
            influencer_label: influencer_label.into(),
        }
    }
}

/// Turn triples into candidates.
///
/// Triples with a blank label are dropped. The snippet is synthesized as
/// `"<subject> influenced by <label>"`.
pub fn structured_candidates(subject: &str, triples: &[StructuredInfluence]) -> Vec<ExtractedCandidate> {
    triples
        .iter()
        .filter_map(|t| {
            let label = t.influencer_label.trim();
            if label.is_empty() {
                return None;
            }
            Some(ExtractedCandidate::new(
                label,
                label,
                format!("{} influenced by {}", subject.trim(), label),
                STRUCTURED_SECTION_PATH,
                CandidateMethod::Structured,
            ))
        })
        .collect()
}
