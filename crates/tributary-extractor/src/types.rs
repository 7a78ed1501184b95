//! Request and response types for extraction

use serde::{Deserialize, Serialize};
use tributary_domain::{EvidenceSection, ScoredCandidate};

use crate::structured::StructuredInfluence;

/// Request to extract influence claims for one artist from one source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Artist whose influences are being extracted
    pub subject: String,

    /// Source channel the claims are stored under
    pub source: String,

    /// Text sections to scan
    #[serde(default)]
    pub sections: Vec<EvidenceSection>,

    /// Knowledge-base "influenced by" triples
    #[serde(default)]
    pub structured: Vec<StructuredInfluence>,
}

impl ExtractionRequest {
    /// Request over text sections
    pub fn new(subject: impl Into<String>, source: impl Into<String>, sections: Vec<EvidenceSection>) -> Self {
        Self {
            subject: subject.into(),
            source: source.into(),
            sections,
            structured: Vec::new(),
        }
    }

    /// Add structured triples
    pub fn with_structured(mut self, structured: Vec<StructuredInfluence>) -> Self {
        self.structured = structured;
        self
    }
}

/// Result of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRun {
    /// Artist the run was for
    pub subject: String,

    /// Source channel
    pub source: String,

    /// Scored, deduplicated candidates in section and sentence order
    pub scored: Vec<ScoredCandidate>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Sections scanned
    pub sections_processed: usize,

    /// Empty or whitespace-only sections
    pub sections_skipped: usize,

    /// Sentences scanned across all sections
    pub sentences_scanned: usize,

    /// Candidates found before deduplication
    pub candidates_found: usize,

    /// Candidates left after deduplication
    pub candidates_kept: usize,

    /// Scorer name
    pub scorer_name: String,

    /// Extraction rule version
    pub extraction_version: String,

    /// Timestamp when extraction occurred (Unix seconds)
    pub timestamp: u64,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
