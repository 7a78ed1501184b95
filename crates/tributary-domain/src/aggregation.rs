//! Evidence aggregation
//!
//! Combines scored candidates from every source channel into one ranked
//! score per influence artist:
//! 1. Group by influence artist (exact string key)
//! 2. Noisy-OR within each source channel (unlisted sources share one)
//! 3. Weighted sum across channels, rounded to 3 decimals
//! 4. Rank groups by score, evidence count, then name

use crate::candidate::ScoredCandidate;
use crate::influence::{EvidenceItem, InfluenceResult};
use crate::section::sources;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Default cap on evidence items per influence
pub const DEFAULT_MAX_EVIDENCE: usize = 3;

/// Weight applied to sources without an explicit entry
pub const DEFAULT_SOURCE_WEIGHT: f64 = 1.0;

/// Configuration for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Per-source weights, keyed by lowercase source tag
    pub source_weights: BTreeMap<String, f64>,
    /// Weight for sources not listed above
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    /// Evidence items kept per influence
    #[serde(default = "default_max_evidence")]
    pub max_evidence: usize,
}

fn default_weight() -> f64 {
    DEFAULT_SOURCE_WEIGHT
}

fn default_max_evidence() -> usize {
    DEFAULT_MAX_EVIDENCE
}

impl Default for AggregationConfig {
    fn default() -> Self {
        let mut source_weights = BTreeMap::new();
        source_weights.insert(sources::WIKIPEDIA.to_string(), 1.0);
        source_weights.insert(sources::YOUTUBE.to_string(), 1.3);
        source_weights.insert(sources::WIKIDATA.to_string(), 0.8);

        Self {
            source_weights,
            default_weight: DEFAULT_SOURCE_WEIGHT,
            max_evidence: DEFAULT_MAX_EVIDENCE,
        }
    }
}

impl AggregationConfig {
    /// Weight for a source tag (case-insensitive)
    pub fn weight_for(&self, source: &str) -> f64 {
        self.source_weights
            .get(&source.to_lowercase())
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Aggregation channel for a source tag.
    ///
    /// Weighted sources are their own channel; every unlisted source shares
    /// one channel (`None`).
    pub fn channel_for(&self, source: &str) -> Option<String> {
        let key = source.to_lowercase();
        self.source_weights.contains_key(&key).then_some(key)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.default_weight.is_finite() && self.default_weight >= 0.0) {
            return Err(format!("default_weight {} must be finite and >= 0", self.default_weight));
        }
        for (source, weight) in &self.source_weights {
            if !(weight.is_finite() && *weight >= 0.0) {
                return Err(format!("weight for '{}' must be finite and >= 0", source));
            }
        }
        Ok(())
    }
}

/// Noisy-OR combination: `1 - Π(1 - pᵢ)`.
///
/// Probabilities `<= 0` (and NaN) are skipped; any probability `>= 1`
/// short-circuits to exactly 1.0.
///
/// # Examples
///
/// ```
/// use tributary_domain::noisy_or;
///
/// assert_eq!(noisy_or(&[0.5, 0.5]), 0.75);
/// assert_eq!(noisy_or(&[0.3, 1.0]), 1.0);
/// assert_eq!(noisy_or(&[]), 0.0);
/// ```
pub fn noisy_or(probabilities: &[f64]) -> f64 {
    let mut product = 1.0;
    for &p in probabilities {
        if p.is_nan() || p <= 0.0 {
            continue;
        }
        if p >= 1.0 {
            return 1.0;
        }
        product *= 1.0 - p;
    }
    1.0 - product
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Aggregate scored candidates into a ranked influence list.
///
/// The output is a total order: score descending, evidence count
/// descending, case-insensitive name ascending, then exact name.
pub fn aggregate_influences(
    candidates: &[ScoredCandidate],
    config: &AggregationConfig,
) -> Vec<InfluenceResult> {
    let mut groups: HashMap<&str, Vec<&ScoredCandidate>> = HashMap::new();
    for candidate in candidates {
        groups.entry(candidate.influence_artist()).or_default().push(candidate);
    }

    let mut results: Vec<InfluenceResult> = groups
        .into_iter()
        .map(|(name, items)| build_result(name, items, config))
        .collect();

    results.sort_by(compare_results);
    results
}

fn build_result(name: &str, mut items: Vec<&ScoredCandidate>, config: &AggregationConfig) -> InfluenceResult {
    // BTreeMap keeps the channel summation order stable
    let mut by_channel: BTreeMap<Option<String>, Vec<f64>> = BTreeMap::new();
    for item in &items {
        by_channel
            .entry(config.channel_for(&item.source))
            .or_default()
            .push(item.claim_probability);
    }

    let score: f64 = by_channel
        .iter()
        .filter(|(_, ps)| !ps.is_empty())
        .map(|(channel, ps)| {
            let weight = channel
                .as_deref()
                .map_or(config.default_weight, |source| config.weight_for(source));
            weight * noisy_or(ps)
        })
        .sum();

    items.sort_by(|a, b| compare_evidence(a, b, config));

    let evidence = items
        .iter()
        .take(config.max_evidence)
        .map(|it| EvidenceItem {
            source: it.source.clone(),
            section_path: it.candidate.section_path.clone(),
            snippet: it.candidate.snippet.clone(),
            pattern_type: it.candidate.pattern_label().to_string(),
            claim_probability: it.claim_probability,
        })
        .collect();

    InfluenceResult {
        influence_artist: name.to_string(),
        score: round3(score),
        evidence_count: items.len(),
        evidence,
    }
}

fn compare_evidence(a: &ScoredCandidate, b: &ScoredCandidate, config: &AggregationConfig) -> Ordering {
    let rank_a = config.weight_for(&a.source) * a.claim_probability;
    let rank_b = config.weight_for(&b.source) * b.claim_probability;

    rank_b
        .total_cmp(&rank_a)
        .then_with(|| b.claim_probability.total_cmp(&a.claim_probability))
        .then_with(|| a.candidate.section_path.cmp(&b.candidate.section_path))
        .then_with(|| a.candidate.snippet.cmp(&b.candidate.snippet))
}

fn compare_results(a: &InfluenceResult, b: &InfluenceResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.evidence_count.cmp(&a.evidence_count))
        .then_with(|| {
            a.influence_artist
                .to_lowercase()
                .cmp(&b.influence_artist.to_lowercase())
        })
        .then_with(|| a.influence_artist.cmp(&b.influence_artist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{CandidateMethod, ExtractedCandidate, PatternType};

    fn scored(name: &str, source: &str, p: f64, path: &str) -> ScoredCandidate {
        let candidate = ExtractedCandidate::new(
            name,
            name,
            format!("snippet about {}", name),
            path,
            CandidateMethod::Cue(PatternType::Strong),
        );
        ScoredCandidate::new(candidate, source, p)
    }

    #[test]
    fn test_noisy_or_two_halves() {
        assert!((noisy_or(&[0.5, 0.5]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_noisy_or_skips_non_positive() {
        assert_eq!(noisy_or(&[0.0, -0.3, f64::NAN]), 0.0);
        assert!((noisy_or(&[0.0, 0.4]) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_certain_probability_contributes_exact_weight() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(&[scored("Can", "youtube", 1.0, "a"), scored("Can", "youtube", 0.2, "b")], &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 1.3);
    }

    #[test]
    fn test_weighted_sum_across_channels() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(
            &[
                scored("Neu!", "wikipedia", 0.5, "a"),
                scored("Neu!", "wikipedia", 0.5, "b"),
                scored("Neu!", "wikidata", 0.5, "c"),
            ],
            &config,
        );
        // 1.0 * 0.75 + 0.8 * 0.5
        assert_eq!(out[0].score, 1.15);
        assert_eq!(out[0].evidence_count, 3);
    }

    #[test]
    fn test_unknown_source_uses_default_weight() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(&[scored("Suicide", "Podcast", 0.4, "a")], &config);
        assert_eq!(out[0].score, 0.4);
        assert_eq!(config.weight_for("YouTube"), 1.3);
    }

    #[test]
    fn test_unknown_sources_share_one_channel() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(
            &[scored("Suicide", "podcast", 0.5, "a"), scored("Suicide", "blog", 0.5, "b")],
            &config,
        );
        // one noisy-OR over both: 1.0 * 0.75
        assert_eq!(out[0].score, 0.75);
        assert_eq!(config.channel_for("Podcast"), None);
        assert_eq!(config.channel_for("YouTube").as_deref(), Some("youtube"));
    }

    #[test]
    fn test_evidence_capped_and_ordered() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(
            &[
                scored("Eno", "wikipedia", 0.9, "z"),
                scored("Eno", "youtube", 0.8, "y"),
                scored("Eno", "wikipedia", 0.9, "a"),
                scored("Eno", "wikidata", 0.95, "x"),
            ],
            &config,
        );
        let evidence = &out[0].evidence;
        assert_eq!(evidence.len(), 3);
        // youtube 1.04 > wikipedia 0.9 (path a) > wikipedia 0.9 (path z); wikidata 0.76 dropped
        assert_eq!(evidence[0].source, "youtube");
        assert_eq!(evidence[1].section_path, "a");
        assert_eq!(evidence[2].section_path, "z");
        assert_eq!(out[0].evidence_count, 4);
    }

    #[test]
    fn test_tie_break_by_case_insensitive_name() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(
            &[scored("carl", "wikipedia", 0.5, "a"), scored("Bob", "wikipedia", 0.5, "a")],
            &config,
        );
        let names: Vec<_> = out.iter().map(|r| r.influence_artist.as_str()).collect();
        assert_eq!(names, vec!["Bob", "carl"]);
    }

    #[test]
    fn test_sort_by_score_then_count() {
        let config = AggregationConfig::default();
        let out = aggregate_influences(
            &[
                scored("Low", "wikipedia", 0.2, "a"),
                scored("Many", "wikipedia", 0.5, "a"),
                scored("Many", "wikidata", 0.0, "b"),
                scored("One", "wikipedia", 0.5, "a"),
                scored("High", "youtube", 0.9, "a"),
            ],
            &config,
        );
        let names: Vec<_> = out.iter().map(|r| r.influence_artist.as_str()).collect();
        assert_eq!(names, vec!["High", "Many", "One", "Low"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_influences(&[], &AggregationConfig::default()).is_empty());
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let mut config = AggregationConfig::default();
        config.source_weights.insert("youtube".to_string(), f64::NAN);
        assert!(config.validate().is_err());
        assert!(AggregationConfig::default().validate().is_ok());
    }
}
