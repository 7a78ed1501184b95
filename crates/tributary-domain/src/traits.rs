//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and its
//! collaborators. Implementations live in other crates (or in the host
//! application).

use crate::candidate::ScoredCandidate;
use crate::variant::VariantRecord;
use std::ops::Range;

/// Splits text into sentences
///
/// Implementations return ordered, non-overlapping byte ranges into the
/// input. Ranges may include surrounding whitespace; callers trim.
pub trait SentenceSegmenter {
    /// Segment text into sentence spans
    fn segment(&self, text: &str) -> Vec<Range<usize>>;
}

/// Entity type reported by a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    /// A person
    Person,
    /// An organization (band, label, studio, ...)
    Organization,
    /// Anything else (places, dates, works)
    Other,
}

/// A named entity within a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Entity text as it appears
    pub text: String,
    /// Entity type
    pub label: EntityLabel,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Entity {
    /// Create an entity
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Person or organization
    pub fn is_person_or_org(&self) -> bool {
        matches!(self.label, EntityLabel::Person | EntityLabel::Organization)
    }
}

/// Finds named entities in a sentence
pub trait EntityRecognizer {
    /// Recognize entities; offsets are byte offsets into `sentence`
    fn recognize(&self, sentence: &str) -> Vec<Entity>;
}

/// Input for one scorer decision
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext {
    /// Artist whose influences are being extracted
    pub subject: String,
    /// Candidate influence artist
    pub influence_artist: String,
    /// Cue strength or extraction method label
    pub pattern_type: String,
    /// Supporting text
    pub snippet: String,
}

/// Assigns claim probabilities to candidates
///
/// Consumed as an opaque probability-producing service. Implementations
/// must return exactly one probability per input, in the same order.
pub trait ClaimScorer {
    /// Error type for scoring operations
    type Error;

    /// Score a batch of candidates
    fn score_batch(&self, contexts: &[ScoringContext]) -> Result<Vec<f64>, Self::Error>;

    /// Name used in run metadata
    fn name(&self) -> &str {
        "scorer"
    }
}

/// Read access to persisted roster variants
pub trait RosterSource {
    /// Error type for load operations
    type Error;

    /// Load every persisted variant row
    fn load_variants(&self) -> Result<Vec<VariantRecord>, Self::Error>;
}

/// Persistence for extracted claims
///
/// Implemented by the host application; an in-memory version ships with
/// the extractor crate.
pub trait ClaimStore {
    /// Error type for store operations
    type Error;

    /// Replace every claim for (subject, source) with `claims`
    fn replace_claims(
        &mut self,
        subject: &str,
        source: &str,
        claims: Vec<ScoredCandidate>,
    ) -> Result<(), Self::Error>;

    /// Claims stored for (subject, source)
    fn claims_for(&self, subject: &str, source: &str) -> Result<Vec<ScoredCandidate>, Self::Error>;
}
