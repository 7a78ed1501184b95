//! Influence candidates, from raw extraction through scoring

use crate::variant::MatchForm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength of the linguistic cue that produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// First-person or explicit citation ("influenced me", "cited as influences")
    Direct,
    /// Clear third-person statement ("inspired by", "grew up listening to")
    Strong,
    /// Comparison only ("sounds like", "reminiscent of")
    Weak,
}

impl PatternType {
    /// Stable string label
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Direct => "direct",
            PatternType::Strong => "strong",
            PatternType::Weak => "weak",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a candidate was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CandidateMethod {
    /// Literal match against the seeded variant index
    StringMatch,
    /// Unconstrained entity tag, no cue required
    Entity,
    /// Cue pattern of the given strength
    Cue(PatternType),
    /// Structured knowledge-base triple
    Structured,
}

impl CandidateMethod {
    /// Label used as `pattern_type` in evidence output
    pub fn label(&self) -> &'static str {
        match self {
            CandidateMethod::StringMatch => "string_match",
            CandidateMethod::Entity => "ner",
            CandidateMethod::Cue(p) => p.as_str(),
            CandidateMethod::Structured => "structured",
        }
    }

    /// Parse a label produced by [`CandidateMethod::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "string_match" => Some(CandidateMethod::StringMatch),
            "ner" => Some(CandidateMethod::Entity),
            "direct" => Some(CandidateMethod::Cue(PatternType::Direct)),
            "strong" => Some(CandidateMethod::Cue(PatternType::Strong)),
            "weak" => Some(CandidateMethod::Cue(PatternType::Weak)),
            "structured" => Some(CandidateMethod::Structured),
            _ => None,
        }
    }

    /// Cue strength, if this is a cue-pattern candidate
    pub fn pattern_type(&self) -> Option<PatternType> {
        match self {
            CandidateMethod::Cue(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for CandidateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<CandidateMethod> for String {
    fn from(method: CandidateMethod) -> Self {
        method.label().to_string()
    }
}

impl TryFrom<String> for CandidateMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CandidateMethod::from_label(&value).ok_or_else(|| format!("unknown candidate method: {}", value))
    }
}

/// A possible influence claim extracted from one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCandidate {
    /// Influence artist name (raw, canonicalized, or registry display name)
    pub influence_artist: String,
    /// Text as it appeared in the source
    pub mention_text: String,
    /// Sentence (or section) the candidate came from
    pub snippet: String,
    /// Section locator
    pub section_path: String,
    /// Extraction method
    pub method: CandidateMethod,
    /// Surface form for string matches
    pub match_form: Option<MatchForm>,
    /// External registry identifier, once resolved
    pub resolved_id: Option<String>,
}

impl ExtractedCandidate {
    /// Create an unresolved candidate
    pub fn new(
        influence_artist: impl Into<String>,
        mention_text: impl Into<String>,
        snippet: impl Into<String>,
        section_path: impl Into<String>,
        method: CandidateMethod,
    ) -> Self {
        Self {
            influence_artist: influence_artist.into(),
            mention_text: mention_text.into(),
            snippet: snippet.into(),
            section_path: section_path.into(),
            method,
            match_form: None,
            resolved_id: None,
        }
    }

    /// Attach a match form
    pub fn with_match_form(mut self, form: MatchForm) -> Self {
        self.match_form = Some(form);
        self
    }

    /// Attach a resolved identifier and, when known, the registry's display name
    pub fn resolved(mut self, id: impl Into<String>, canonical_name: Option<String>) -> Self {
        self.resolved_id = Some(id.into());
        if let Some(name) = canonical_name.filter(|n| !n.trim().is_empty()) {
            self.influence_artist = name;
        }
        self
    }

    /// Evidence label for this candidate
    pub fn pattern_label(&self) -> &'static str {
        self.method.label()
    }
}

/// A candidate with its claim probability, attributed to a source channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The underlying candidate
    #[serde(flatten)]
    pub candidate: ExtractedCandidate,
    /// Source channel (e.g. "wikipedia")
    pub source: String,
    /// Claim probability in [0, 1]
    pub claim_probability: f64,
}

impl ScoredCandidate {
    /// Pair a candidate with its probability
    pub fn new(candidate: ExtractedCandidate, source: impl Into<String>, claim_probability: f64) -> Self {
        Self {
            candidate,
            source: source.into(),
            claim_probability,
        }
    }

    /// Grouping key for aggregation
    pub fn influence_artist(&self) -> &str {
        &self.candidate.influence_artist
    }
}
