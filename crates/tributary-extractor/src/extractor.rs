//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::cues::CueExtractor;
use crate::dedupe::Canonicalizer;
use crate::entities::CapitalizedSpanRecognizer;
use crate::error::ExtractorError;
use crate::segment::PunctuationSegmenter;
use crate::structured::structured_candidates;
use crate::types::{ExtractionMetadata, ExtractionRequest, ExtractionRun};
use std::fmt::Display;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use tributary_domain::freshness::CURRENT_EXTRACTION_VERSION;
use tributary_domain::traits::{
    ClaimScorer, ClaimStore, EntityRecognizer, RosterSource, ScoringContext, SentenceSegmenter,
};
use tributary_domain::{
    aggregate_influences, AggregationConfig, CandidateMethod, EvidenceSection, ExtractedCandidate,
    InfluenceResult, ScoredCandidate,
};
use tributary_identity::IdentityResolver;
use tributary_index::{SeededIndex, VariantIndex};

/// Turns evidence sections into scored influence candidates
///
/// One run covers one (subject, source) pair: every section is scanned
/// for literal roster matches and cue patterns, candidates are resolved and
/// deduplicated per section, and the whole run is scored in one batch.
pub struct Extractor<S, R> {
    scorer: Arc<S>,
    index: Arc<SeededIndex<R>>,
    resolver: Option<Arc<IdentityResolver>>,
    segmenter: Arc<dyn SentenceSegmenter + Send + Sync>,
    recognizer: Arc<dyn EntityRecognizer + Send + Sync>,
    aggregation: AggregationConfig,
    config: ExtractorConfig,
}

impl<S, R> Extractor<S, R>
where
    S: ClaimScorer + Send + Sync + 'static,
    S::Error: Display,
    R: RosterSource,
    R::Error: Display,
{
    /// Create an Extractor with the default segmenter and recognizer and no
    /// identity resolution
    pub fn new(scorer: S, index: Arc<SeededIndex<R>>, config: ExtractorConfig) -> Self {
        Self {
            scorer: Arc::new(scorer),
            index,
            resolver: None,
            segmenter: Arc::new(PunctuationSegmenter),
            recognizer: Arc::new(CapitalizedSpanRecognizer),
            aggregation: AggregationConfig::default(),
            config,
        }
    }

    /// Resolve candidates against an identity registry
    pub fn with_resolver(mut self, resolver: Arc<IdentityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the sentence segmenter
    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + Send + Sync + 'static) -> Self {
        self.segmenter = Arc::new(segmenter);
        self
    }

    /// Replace the entity recognizer
    pub fn with_recognizer(mut self, recognizer: impl EntityRecognizer + Send + Sync + 'static) -> Self {
        self.recognizer = Arc::new(recognizer);
        self
    }

    /// Replace the aggregation weights used by [`Extractor::rank`]
    pub fn with_aggregation(mut self, aggregation: AggregationConfig) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn canonicalizer(&self) -> Canonicalizer {
        match &self.resolver {
            Some(resolver) if self.config.resolve_identities => Canonicalizer::new(Arc::clone(resolver)),
            _ => Canonicalizer::offline(),
        }
    }

    /// Raw candidates of one section, in sentence order, and the number of
    /// sentences scanned.
    ///
    /// Per sentence: cue candidates, then literal roster matches, then (when
    /// enabled) every person/organization entity.
    pub fn scan_section(
        &self,
        section: &EvidenceSection,
        subject: &str,
        index: &VariantIndex,
    ) -> (Vec<ExtractedCandidate>, usize) {
        let cues = CueExtractor::new(self.recognizer.as_ref(), self.config.entity_window_chars);
        let path = section.section_path.as_str();
        let mut candidates = Vec::new();
        let mut sentences = 0;

        for span in self.segmenter.segment(&section.text) {
            let Some(sentence) = section.text.get(span) else {
                continue;
            };
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            sentences += 1;

            candidates.extend(cues.extract_sentence(sentence, path, Some(subject)));

            candidates.extend(index.find_matches(sentence).into_iter().map(|m| {
                ExtractedCandidate::new(m.canonical_name, m.mention_text, sentence, path, CandidateMethod::StringMatch)
                    .with_match_form(m.match_form)
            }));

            if self.config.include_entities {
                candidates.extend(
                    self.recognizer
                        .recognize(sentence)
                        .into_iter()
                        .filter(|e| e.is_person_or_org())
                        .map(|e| {
                            let text = e.text.trim();
                            ExtractedCandidate::new(text, text, sentence, path, CandidateMethod::Entity)
                        }),
                );
            }
        }

        (candidates, sentences)
    }

    /// Extract resolved, deduplicated candidates from one section
    pub async fn extract_section(
        &self,
        section: &EvidenceSection,
        subject: &str,
    ) -> Result<Vec<ExtractedCandidate>, ExtractorError> {
        let index = self.index.get()?;
        let (raw, _) = self.scan_section(section, subject, &index);
        Ok(self.canonicalizer().canonicalize(raw).await)
    }

    /// Run extraction for one (subject, source) pair.
    ///
    /// Fails without partial output when the scorer errors, returns a
    /// different number of probabilities than candidates, or returns a
    /// value outside [0, 1].
    pub async fn run(&self, request: ExtractionRequest) -> Result<ExtractionRun, ExtractorError> {
        let start_time = Instant::now();
        let subject = request.subject.trim().to_string();

        info!(
            "Starting extraction for '{}' from '{}': {} sections, {} structured",
            subject,
            request.source,
            request.sections.len(),
            request.structured.len()
        );

        let index = self.index.get()?;
        let canonicalizer = self.canonicalizer();
        let mut metadata = ExtractionMetadata {
            scorer_name: self.scorer.name().to_string(),
            extraction_version: CURRENT_EXTRACTION_VERSION.to_string(),
            ..Default::default()
        };

        let mut candidates = Vec::new();
        for section in &request.sections {
            if section.is_blank() {
                debug!("Skipping blank section '{}'", section.section_path);
                metadata.sections_skipped += 1;
                continue;
            }
            metadata.sections_processed += 1;

            let (raw, sentences) = self.scan_section(section, &subject, &index);
            metadata.sentences_scanned += sentences;
            metadata.candidates_found += raw.len();
            debug!("Section '{}': {} sentences, {} raw candidates", section.section_path, sentences, raw.len());

            candidates.extend(canonicalizer.canonicalize(raw).await);
        }

        if !request.structured.is_empty() {
            let raw = structured_candidates(&subject, &request.structured);
            metadata.candidates_found += raw.len();
            candidates.extend(canonicalizer.canonicalize(raw).await);
        }
        metadata.candidates_kept = candidates.len();

        let probabilities = self.score(&subject, &candidates).await?;
        let scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .zip(probabilities)
            .map(|(candidate, p)| ScoredCandidate::new(candidate, request.source.as_str(), p))
            .collect();

        metadata.timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Extraction complete for '{}': {} found, {} kept in {} ms",
            subject, metadata.candidates_found, metadata.candidates_kept, metadata.processing_time_ms
        );

        Ok(ExtractionRun {
            subject,
            source: request.source,
            scored,
            metadata,
        })
    }

    /// Run extraction and replace the stored claims for (subject, source).
    ///
    /// Nothing is written when the run fails.
    pub async fn run_and_store<C>(
        &self,
        request: ExtractionRequest,
        store: &mut C,
    ) -> Result<ExtractionRun, ExtractorError>
    where
        C: ClaimStore,
        C::Error: Display,
    {
        let run = self.run(request).await?;
        store
            .replace_claims(&run.subject, &run.source, run.scored.clone())
            .map_err(|e| ExtractorError::Store(e.to_string()))?;
        info!("Stored {} claims for '{}' from '{}'", run.scored.len(), run.subject, run.source);
        Ok(run)
    }

    /// Aggregate the scored candidates of several runs into a ranked list
    pub fn rank(&self, runs: &[ExtractionRun]) -> Vec<InfluenceResult> {
        let scored: Vec<ScoredCandidate> = runs.iter().flat_map(|r| r.scored.iter().cloned()).collect();
        aggregate_influences(&scored, &self.aggregation)
    }

    async fn score(&self, subject: &str, candidates: &[ExtractedCandidate]) -> Result<Vec<f64>, ExtractorError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let contexts: Vec<ScoringContext> = candidates
            .iter()
            .map(|c| ScoringContext {
                subject: subject.to_string(),
                influence_artist: c.influence_artist.clone(),
                pattern_type: c.pattern_label().to_string(),
                snippet: c.snippet.clone(),
            })
            .collect();

        let scorer = Arc::clone(&self.scorer);
        // Scorer implementations may block (model inference)
        let probabilities = tokio::task::spawn_blocking(move || {
            scorer
                .score_batch(&contexts)
                .map_err(|e| ExtractorError::Scorer(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Scorer(format!("Task join error: {}", e)))??;

        if probabilities.len() != candidates.len() {
            return Err(ExtractorError::ScorerContract {
                expected: candidates.len(),
                actual: probabilities.len(),
            });
        }
        if let Some((index, &value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(ExtractorError::InvalidProbability { index, value });
        }

        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NoEntities;
    use crate::structured::StructuredInfluence;
    use tributary_domain::PatternType;
    use tributary_identity::{MockRegistry, ResolverConfig};
    use tributary_index::{IndexConfig, InMemoryRoster};
    use tributary_scorer::{HeuristicScorer, MockScorer, NullScorer};

    fn index(names: &[&str]) -> Arc<SeededIndex<InMemoryRoster>> {
        let config = IndexConfig::default();
        Arc::new(SeededIndex::new(InMemoryRoster::from_names(names, &config), &config))
    }

    fn section(path: &str, text: &str) -> EvidenceSection {
        EvidenceSection::new("wikipedia", path, text)
    }

    #[tokio::test]
    async fn test_scan_section_orders_cues_before_literals() {
        let extractor = Extractor::new(NullScorer, index(&["Radiohead"]), ExtractorConfig::offline())
            .with_recognizer(NoEntities);
        let roster = extractor.index.get().unwrap();
        let (raw, sentences) = extractor.scan_section(
            &section("Style", "They were inspired by Radiohead. The band formed in 1990."),
            "Muse",
            &roster,
        );
        assert_eq!(sentences, 2);
        let methods: Vec<_> = raw.iter().map(|c| c.method).collect();
        assert_eq!(
            methods,
            vec![CandidateMethod::Cue(PatternType::Strong), CandidateMethod::StringMatch]
        );
        assert_eq!(raw[1].snippet, "They were inspired by Radiohead.");
    }

    #[tokio::test]
    async fn test_entity_pass_only_when_enabled() {
        let text = "Members later toured Manchester with Johnny Marr.";
        let registry = MockRegistry::new().with_artist("Johnny Marr", "marr-id", 100);
        let resolver = Arc::new(IdentityResolver::new(registry, ResolverConfig::unthrottled()));

        let extractor = Extractor::new(NullScorer, index(&[]), ExtractorConfig::default())
            .with_resolver(Arc::clone(&resolver));
        let out = extractor.extract_section(&section("Tour", text), "Blur").await.unwrap();
        assert!(out.is_empty());

        let extractor = Extractor::new(NullScorer, index(&[]), ExtractorConfig::thorough()).with_resolver(resolver);
        let out = extractor.extract_section(&section("Tour", text), "Blur").await.unwrap();
        let names: Vec<_> = out.iter().map(|c| c.influence_artist.as_str()).collect();
        assert_eq!(names, vec!["Johnny Marr"]);
        assert_eq!(out[0].pattern_label(), "ner");
        assert_eq!(out[0].resolved_id.as_deref(), Some("marr-id"));
    }

    #[tokio::test]
    async fn test_offline_entity_pass_keeps_nothing() {
        let config = ExtractorConfig {
            include_entities: true,
            ..ExtractorConfig::offline()
        };
        let extractor = Extractor::new(NullScorer, index(&[]), config);
        let out = extractor
            .extract_section(&section("Tour", "Members later toured Manchester with Johnny Marr."), "Blur")
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_run_metadata_counts() {
        let extractor = Extractor::new(HeuristicScorer::default(), index(&["Can"]), ExtractorConfig::offline());
        let request = ExtractionRequest::new(
            "Radiohead",
            "wikipedia",
            vec![
                section("Influences", "Radiohead were influenced by Can and Neu!."),
                section("Empty", "   \n "),
            ],
        );
        let run = extractor.run(request).await.unwrap();

        assert_eq!(run.metadata.sections_processed, 1);
        assert_eq!(run.metadata.sections_skipped, 1);
        assert_eq!(run.metadata.sentences_scanned, 1);
        assert_eq!(run.metadata.scorer_name, "heuristic");
        assert_eq!(run.metadata.extraction_version, CURRENT_EXTRACTION_VERSION);
        assert_eq!(run.metadata.candidates_kept, run.scored.len());
        assert!(run.metadata.candidates_found >= run.metadata.candidates_kept);
        assert!(run.scored.iter().all(|s| s.source == "wikipedia"));
    }

    #[tokio::test]
    async fn test_empty_run_skips_scorer() {
        let scorer = MockScorer::fixed(vec![0.5]);
        let probe = scorer.clone();
        let extractor = Extractor::new(scorer, index(&[]), ExtractorConfig::offline());
        let run = extractor
            .run(ExtractionRequest::new("Oasis", "wikipedia", vec![section("Early life", "Born in 1972.")]))
            .await
            .unwrap();
        assert!(run.scored.is_empty());
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_probability_fails_run() {
        let extractor = Extractor::new(MockScorer::fixed(vec![1.5]), index(&[]), ExtractorConfig::offline());
        let request = ExtractionRequest::new("Oasis", "wikidata", Vec::new())
            .with_structured(vec![StructuredInfluence::new("Q1299", "The Beatles")]);
        let err = extractor.run(request).await.unwrap_err();
        assert!(matches!(err, ExtractorError::InvalidProbability { index: 0, .. }));
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_nan_probability_fails_run() {
        let extractor = Extractor::new(MockScorer::fixed(vec![f64::NAN]), index(&[]), ExtractorConfig::offline());
        let request = ExtractionRequest::new("Oasis", "wikidata", Vec::new())
            .with_structured(vec![StructuredInfluence::new("Q1299", "The Beatles")]);
        assert!(matches!(
            extractor.run(request).await,
            Err(ExtractorError::InvalidProbability { .. })
        ));
    }

    #[tokio::test]
    async fn test_scorer_failure_propagates() {
        let extractor = Extractor::new(MockScorer::failing("model offline"), index(&[]), ExtractorConfig::offline());
        let request = ExtractionRequest::new("Oasis", "wikidata", Vec::new())
            .with_structured(vec![StructuredInfluence::new("Q1299", "The Beatles")]);
        match extractor.run(request).await {
            Err(ExtractorError::Scorer(msg)) => assert!(msg.contains("model offline")),
            other => panic!("expected scorer error, got {:?}", other.map(|r| r.scored.len())),
        }
    }
}
