//! Rule-based scorer keyed on cue strength

use serde::{Deserialize, Serialize};
use tracing::debug;
use tributary_domain::normalize_text;
use tributary_domain::traits::{ClaimScorer, ScoringContext};

use crate::ScorerError;

/// Base probabilities and adjustments for [`HeuristicScorer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Base for "direct" cues
    pub direct: f64,
    /// Base for "strong" cues
    pub strong: f64,
    /// Base for "weak" cues
    pub weak: f64,
    /// Base for every other label (string matches, entities, structured)
    pub other: f64,
    /// Multiplier when the candidate is the subject itself
    pub self_reference_factor: f64,
    /// Lower clamp
    pub floor: f64,
    /// Upper clamp
    pub ceiling: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            direct: 0.95,
            strong: 0.80,
            weak: 0.55,
            other: 1.0,
            self_reference_factor: 0.2,
            floor: 0.05,
            ceiling: 1.0,
        }
    }
}

impl HeuristicConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        for (name, value) in [
            ("direct", self.direct),
            ("strong", self.strong),
            ("weak", self.weak),
            ("other", self.other),
            ("self_reference_factor", self.self_reference_factor),
            ("floor", self.floor),
            ("ceiling", self.ceiling),
        ] {
            if !in_unit(value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if self.floor > self.ceiling {
            return Err("floor cannot exceed ceiling".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Scores candidates from their cue strength alone
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    config: HeuristicConfig,
}

impl HeuristicScorer {
    /// Create a scorer with custom settings
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    /// Probability for one candidate
    pub fn score_one(&self, ctx: &ScoringContext) -> f64 {
        let base = match ctx.pattern_type.as_str() {
            "direct" => self.config.direct,
            "strong" => self.config.strong,
            "weak" => self.config.weak,
            _ => self.config.other,
        };

        let subject = normalize_text(&ctx.subject);
        let p = if !subject.is_empty() && subject == normalize_text(&ctx.influence_artist) {
            debug!(artist = %ctx.influence_artist, "Candidate is the subject");
            base * self.config.self_reference_factor
        } else {
            base
        };

        p.max(self.config.floor).min(self.config.ceiling)
    }
}

impl ClaimScorer for HeuristicScorer {
    type Error = ScorerError;

    fn score_batch(&self, contexts: &[ScoringContext]) -> Result<Vec<f64>, Self::Error> {
        Ok(contexts.iter().map(|ctx| self.score_one(ctx)).collect())
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
