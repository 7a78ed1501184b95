//! Tributary Seeded Variant Index
//!
//! Builds an inverted index from a roster of known artist names and finds
//! literal mentions of those names in free text.
//!
//! # Overview
//!
//! Every roster name is normalized and expanded into one or two variants:
//! the full form, and a "the_stripped" form for names like "The Beatles"
//! (unless denylisted). Variants are bucketed by first token, longest first,
//! so matching always prefers the most specific name.
//!
//! # Example
//!
//! ```
//! use tributary_index::{IndexConfig, InMemoryRoster, SeededIndex};
//!
//! let config = IndexConfig::default();
//! let roster = InMemoryRoster::from_names(&["The Beatles", "Radiohead"], &config);
//! let index = SeededIndex::new(roster, &config);
//!
//! let matches = index.get().unwrap().find_matches("heavily influenced by Beatles and Radiohead");
//! let names: Vec<_> = matches.iter().map(|m| m.canonical_name.as_str()).collect();
//! assert_eq!(names, vec!["The Beatles", "Radiohead"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod roster;
pub mod variants;

pub use cache::SeededIndex;
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{LiteralMatch, VariantIndex};
pub use roster::InMemoryRoster;
pub use variants::{build_variants, normalize_denylist};
