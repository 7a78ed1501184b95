//! Name variants for literal matching against the seeded roster

use crate::normalize::normalize_text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which surface form of a roster name a variant represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchForm {
    /// The name exactly as listed
    Full,
    /// The name with a leading "The " removed
    TheStripped,
}

impl MatchForm {
    /// Stable string tag, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchForm::Full => "full",
            MatchForm::TheStripped => "the_stripped",
        }
    }

    /// Parse a persisted tag
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "full" => Some(MatchForm::Full),
            "the_stripped" => Some(MatchForm::TheStripped),
            _ => None,
        }
    }
}

impl fmt::Display for MatchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One matchable variant of a roster name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameVariantEntry {
    /// Display name of the roster entry this variant belongs to
    pub canonical_name: String,
    /// Normalized variant string
    pub variant_norm: String,
    /// Normalized tokens, in order
    pub tokens: Vec<String>,
    /// Number of tokens
    pub token_count: usize,
    /// Character length of `variant_norm`
    pub char_len: usize,
    /// Where the roster entry came from (e.g. "seed")
    pub provenance: String,
    /// Surface form
    pub match_form: MatchForm,
}

impl NameVariantEntry {
    /// Build an entry from an already-normalized variant string
    pub fn new(
        canonical_name: impl Into<String>,
        variant_norm: impl Into<String>,
        provenance: impl Into<String>,
        match_form: MatchForm,
    ) -> Self {
        let variant_norm = variant_norm.into();
        let tokens: Vec<String> = variant_norm.split_whitespace().map(str::to_string).collect();
        Self {
            canonical_name: canonical_name.into(),
            token_count: tokens.len(),
            char_len: variant_norm.chars().count(),
            variant_norm,
            tokens,
            provenance: provenance.into(),
            match_form,
        }
    }

    /// First normalized token (the index bucket key)
    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

/// Persisted shape of a variant row, as read from the roster data source.
///
/// The derived columns are optional; missing values are recomputed from
/// `variant_norm` when the row is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Display name of the roster entry
    pub canonical_name: String,
    /// Normalized variant string
    pub variant_norm: String,
    /// Bucket key
    #[serde(default)]
    pub first_token: Option<String>,
    /// Token count
    #[serde(default)]
    pub token_count: Option<usize>,
    /// Character length
    #[serde(default)]
    pub char_len: Option<usize>,
    /// Provenance tag
    pub source: String,
    /// "full" or "the_stripped"
    pub match_form: String,
}

impl VariantRecord {
    /// Convert a row into an index entry plus its bucket key.
    ///
    /// Returns `None` for rows with no usable tokens.
    pub fn into_entry(self) -> Option<(String, NameVariantEntry)> {
        let variant_norm = normalize_text(&self.variant_norm);
        if variant_norm.is_empty() {
            return None;
        }

        let match_form = MatchForm::from_label(&self.match_form).unwrap_or(MatchForm::Full);
        let mut entry = NameVariantEntry::new(self.canonical_name, variant_norm, self.source, match_form);

        if let Some(count) = self.token_count.filter(|c| *c > 0) {
            entry.token_count = count;
        }
        if let Some(len) = self.char_len.filter(|l| *l > 0) {
            entry.char_len = len;
        }

        let bucket = self
            .first_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| entry.first_token().map(str::to_string))?;

        Some((bucket, entry))
    }
}

impl From<&NameVariantEntry> for VariantRecord {
    fn from(entry: &NameVariantEntry) -> Self {
        Self {
            canonical_name: entry.canonical_name.clone(),
            variant_norm: entry.variant_norm.clone(),
            first_token: entry.first_token().map(str::to_string),
            token_count: Some(entry.token_count),
            char_len: Some(entry.char_len),
            source: entry.provenance.clone(),
            match_form: entry.match_form.as_str().to_string(),
        }
    }
}
