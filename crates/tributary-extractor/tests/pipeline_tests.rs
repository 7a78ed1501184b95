//! Integration tests for tributary-extractor
//!
//! These tests drive the public API end to end: roster seeding, cue and
//! literal extraction, identity resolution, scoring, storage and ranking.

use std::sync::Arc;
use tributary_domain::traits::ClaimStore;
use tributary_domain::{AggregationConfig, EvidenceSection};
use tributary_extractor::{
    find_cue, split_fallback, truncate_tail, ExtractionRequest, Extractor, ExtractorConfig, InMemoryClaimStore,
    StructuredInfluence,
};
use tributary_identity::{IdentityResolver, MockRegistry, ResolverConfig};
use tributary_index::{IndexConfig, InMemoryRoster, SeededIndex};
use tributary_scorer::{HeuristicScorer, NullScorer};

const BIOGRAPHY: &str = "\
Radiohead formed in Abingdon in 1985. The band grew up listening to Joy Division, R.E.M. and Talking Heads.

Thom Yorke said Kid A was heavily influenced by Aphex Twin and Autechre, which shaped its electronic sound. \
Critics compared the album to Can. Radiohead have influenced many younger bands.";

fn roster_index(names: &[&str]) -> Arc<SeededIndex<InMemoryRoster>> {
    let config = IndexConfig::default();
    Arc::new(SeededIndex::new(InMemoryRoster::from_names(names, &config), &config))
}

#[tokio::test]
async fn test_biography_end_to_end() {
    let extractor = Extractor::new(
        HeuristicScorer::default(),
        roster_index(&["Talking Heads", "Can"]),
        ExtractorConfig::offline(),
    );
    let request = ExtractionRequest::new(
        "Radiohead",
        "wikipedia",
        vec![EvidenceSection::new("wikipedia", "Influences", BIOGRAPHY)],
    );

    let run = extractor.run(request).await.unwrap();
    let found: Vec<_> = run.scored.iter().map(|s| s.influence_artist()).collect();

    for expected in ["Joy Division", "R.E.M", "Talking Heads", "Aphex Twin", "Autechre", "Can"] {
        assert!(found.contains(&expected), "missing {} in {:?}", expected, found);
    }
    // "which shaped its electronic sound" is cut from the fallback tail
    assert!(!found.iter().any(|n| n.contains("electronic")));
    assert!(!found.contains(&"Radiohead"));

    let autechre = run.scored.iter().find(|s| s.influence_artist() == "Autechre").unwrap();
    assert_eq!(autechre.candidate.pattern_label(), "strong");
}

#[tokio::test]
async fn test_store_then_rank() {
    let extractor = Extractor::new(NullScorer, roster_index(&[]), ExtractorConfig::offline())
        .with_aggregation(AggregationConfig::default());
    let mut store = InMemoryClaimStore::new();

    let wiki = extractor
        .run_and_store(
            ExtractionRequest::new(
                "Massive Attack",
                "wikipedia",
                vec![EvidenceSection::new("wikipedia", "Style", "Massive Attack drew on Isaac Hayes.")],
            ),
            &mut store,
        )
        .await
        .unwrap();
    let youtube = extractor
        .run_and_store(
            ExtractionRequest::new(
                "Massive Attack",
                "youtube",
                vec![EvidenceSection::new("youtube", "t=120", "We grew up listening to Isaac Hayes")],
            ),
            &mut store,
        )
        .await
        .unwrap();

    assert_eq!(store.claims_for("Massive Attack", "wikipedia").unwrap().len(), 1);
    assert_eq!(store.claims_for("Massive Attack", "youtube").unwrap().len(), 1);

    let ranked = extractor.rank(&[wiki, youtube]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].influence_artist, "Isaac Hayes");
    assert_eq!(ranked[0].score, 2.3);
    assert_eq!(ranked[0].evidence[0].source, "youtube");
}

#[tokio::test]
async fn test_shared_resolver_single_flight_across_runs() {
    let registry = MockRegistry::new().with_artist("Kraftwerk", "kw-1", 100);
    let resolver = Arc::new(IdentityResolver::new(registry.clone(), ResolverConfig::unthrottled()));
    let extractor = Arc::new(
        Extractor::new(HeuristicScorer::default(), roster_index(&[]), ExtractorConfig::default())
            .with_resolver(resolver),
    );

    let request = |subject: &str| {
        ExtractionRequest::new(
            subject,
            "wikipedia",
            vec![EvidenceSection::new("wikipedia", "Style", format!("{} were inspired by Kraftwerk.", subject))],
        )
    };

    let (a, b) = tokio::join!(extractor.run(request("Ultravox")), extractor.run(request("Visage")));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.scored[0].candidate.resolved_id.as_deref(), Some("kw-1"));
    assert_eq!(b.scored[0].candidate.resolved_id.as_deref(), Some("kw-1"));
    assert_eq!(registry.search_calls(), 1);
    assert_eq!(registry.lookup_calls(), 1);
}

#[tokio::test]
async fn test_structured_only_run() {
    let extractor = Extractor::new(HeuristicScorer::default(), roster_index(&[]), ExtractorConfig::offline());
    let request = ExtractionRequest::new("Portishead", "wikidata", Vec::new()).with_structured(vec![
        StructuredInfluence::new("Q193676", "Isaac Hayes"),
        StructuredInfluence::new("Q193676", "Isaac Hayes"),
    ]);

    let run = extractor.run(request).await.unwrap();
    assert_eq!(run.scored.len(), 1);
    assert_eq!(run.scored[0].candidate.snippet, "Portishead influenced by Isaac Hayes");
    assert_eq!(run.scored[0].claim_probability, 1.0);
}

#[test]
fn test_public_rule_helpers() {
    let sentence = "They grew up listening to Wire and Magazine, but later moved on";
    let cue = find_cue(sentence).unwrap();
    let tail = truncate_tail(&sentence[cue.end..]);
    assert_eq!(tail, "Wire and Magazine");
    assert_eq!(split_fallback(tail), vec!["Wire", "Magazine"]);
}
