//! Evidence sections supplied by the ingestion collaborator

use serde::{Deserialize, Serialize};

/// Well-known source channel tags
pub mod sources {
    /// Encyclopedia article sections
    pub const WIKIPEDIA: &str = "wikipedia";
    /// Video transcript windows
    pub const YOUTUBE: &str = "youtube";
    /// Structured knowledge-base triples
    pub const WIKIDATA: &str = "wikidata";
}

/// A labeled block of source text.
///
/// Immutable once produced; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSection {
    /// Source channel tag (e.g. "wikipedia")
    pub source: String,

    /// Hierarchical locator, e.g. "Career > Influences"
    pub section_path: String,

    /// Free text of the section
    pub text: String,

    /// True when ingestion fell back to the whole page
    #[serde(default)]
    pub is_fallback: bool,
}

impl EvidenceSection {
    /// Create a regular (non-fallback) section
    pub fn new(
        source: impl Into<String>,
        section_path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            section_path: section_path.into(),
            text: text.into(),
            is_fallback: false,
        }
    }

    /// Mark this section as a whole-page fallback
    pub fn as_fallback(mut self) -> Self {
        self.is_fallback = true;
        self
    }

    /// True when the section has no extractable text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
