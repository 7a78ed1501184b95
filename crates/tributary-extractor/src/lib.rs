//! Tributary Extractor
//!
//! Turns evidence text about an artist into scored "influenced by" claims.
//!
//! # Overview
//!
//! Each extraction run covers one subject artist and one source channel.
//! Sections are split into sentences; every sentence is scanned by two
//! independent methods:
//!
//! - **Literal matching** against the seeded roster index
//! - **Cue patterns**: ordered phrase rules ("influenced by", "grew up
//!   listening to", "sounds like") that pick out the names they introduce
//!
//! Candidates from both methods are resolved against the identity
//! registry, deduplicated per section, and scored in one batch.
//!
//! # Architecture
//!
//! ```text
//! Sections → Segmenter → CueExtractor ─┐
//!                      → VariantIndex ─┼→ Canonicalizer → ClaimScorer → ClaimStore
//! Triples  → structured_candidates ────┘     (resolver)
//! ```
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use tributary_domain::EvidenceSection;
//! use tributary_extractor::{ExtractionRequest, Extractor, ExtractorConfig};
//! use tributary_index::{IndexConfig, InMemoryRoster, SeededIndex};
//! use tributary_scorer::HeuristicScorer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index_config = IndexConfig::default();
//! let roster = InMemoryRoster::from_names(&["Can", "Neu!"], &index_config);
//! let index = Arc::new(SeededIndex::new(roster, &index_config));
//!
//! let extractor = Extractor::new(HeuristicScorer::default(), index, ExtractorConfig::offline());
//!
//! let request = ExtractionRequest::new(
//!     "Stereolab",
//!     "wikipedia",
//!     vec![EvidenceSection::new("wikipedia", "Style", "Stereolab drew heavily on Can and Neu!.")],
//! );
//! let run = extractor.run(request).await?;
//!
//! for claim in &run.scored {
//!     println!("{} ({:.2})", claim.influence_artist(), claim.claim_probability);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod canonical;
mod config;
mod cues;
mod dedupe;
mod entities;
mod error;
mod extractor;
mod fallback;
mod patterns;
mod segment;
mod store;
mod structured;
mod types;


pub use canonical::{canonical_artist_name, looks_like_artist_name};
pub use config::ExtractorConfig;
pub use cues::{is_reverse_sentence, CueExtractor};
pub use dedupe::{dedupe, dedupe_key, resolution_query, Canonicalizer, DedupeKey};
pub use entities::{CapitalizedSpanRecognizer, NoEntities};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use fallback::{split_fallback, truncate_tail};
pub use patterns::{cue_patterns, find_cue, CueMatch, CuePattern, Direction};
pub use segment::PunctuationSegmenter;
pub use store::InMemoryClaimStore;
pub use structured::{structured_candidates, StructuredInfluence, STRUCTURED_SECTION_PATH};
pub use types::{ExtractionMetadata, ExtractionRequest, ExtractionRun};
