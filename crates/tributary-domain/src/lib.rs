//! Tributary Domain Layer
//!
//! Core data model and pure logic for the influence extraction engine. Every
//! other crate depends on this one; it carries no I/O and no async runtime.
//!
//! ## Key Concepts
//!
//! - **Evidence section**: a labeled block of source text (encyclopedia
//!   section, transcript window, knowledge-base triple) supplied by ingestion
//! - **Candidate**: a possible "subject was influenced by X" claim extracted
//!   from a section, before and after identity resolution
//! - **Scored candidate**: a candidate carrying a claim probability in [0, 1]
//! - **Influence result**: the aggregated, ranked view of one influence
//!   artist across all evidence
//!
//! ## Architecture
//!
//! - Pure business logic only (normalization, aggregation, refresh policy)
//! - Trait definitions for every external collaborator (scorer, roster,
//!   sentence segmenter, entity recognizer, claim store)
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation;
pub mod candidate;
pub mod freshness;
pub mod influence;
pub mod normalize;
pub mod section;
pub mod traits;
pub mod variant;

// Re-exports for convenience
pub use aggregation::{aggregate_influences, noisy_or, AggregationConfig};
pub use candidate::{CandidateMethod, ExtractedCandidate, PatternType, ScoredCandidate};
pub use freshness::{RefreshPlan, RefreshPolicy};
pub use influence::{EvidenceItem, InfluenceResult};
pub use normalize::{normalize_key, normalize_text, tokenize};
pub use section::EvidenceSection;
pub use variant::{MatchForm, NameVariantEntry, VariantRecord};
