//! Ranked influence output handed back to the caller

use serde::{Deserialize, Serialize};

/// One supporting piece of evidence for an influence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Source channel
    pub source: String,
    /// Section locator
    pub section_path: String,
    /// Supporting text
    pub snippet: String,
    /// Cue strength or extraction method label
    pub pattern_type: String,
    /// Claim probability assigned by the scorer
    pub claim_probability: f64,
}

/// Aggregated view of one influence artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceResult {
    /// Influence artist name (grouping key)
    pub influence_artist: String,
    /// Weighted noisy-OR score, rounded to 3 decimals
    pub score: f64,
    /// Number of scored candidates in the group
    pub evidence_count: usize,
    /// Best evidence, strongest first, capped
    pub evidence: Vec<EvidenceItem>,
}
