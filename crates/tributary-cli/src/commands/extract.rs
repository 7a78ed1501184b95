//! Extract command implementation.

use crate::cli::{ExtractArgs, ScorerArg};
use crate::commands::read_roster;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::output::Formatter;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tributary_domain::traits::ClaimScorer;
use tributary_domain::{EvidenceSection, InfluenceResult};
use tributary_extractor::{ExtractionRequest, ExtractionRun, Extractor, StructuredInfluence};
use tributary_identity::{IdentityResolver, MusicBrainzRegistry};
use tributary_index::{InMemoryRoster, SeededIndex};
use tributary_scorer::{HeuristicScorer, NullScorer};

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &EngineConfig, formatter: &Formatter) -> Result<()> {
    let (run, ranked) = run_extract(&args, config).await?;
    println!("{}", formatter.format_run(&run, &ranked)?);
    Ok(())
}

/// Build the pipeline from configuration and run it once.
pub async fn run_extract(args: &ExtractArgs, config: &EngineConfig) -> Result<(ExtractionRun, Vec<InfluenceResult>)> {
    let sections: Vec<EvidenceSection> = read_json(&args.sections)?;
    let structured: Vec<StructuredInfluence> = match &args.structured {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let roster = match &args.roster {
        Some(path) => read_roster(path)?,
        None => Vec::new(),
    };
    info!("Seeding index with {} roster name(s)", roster.len());
    let index = Arc::new(SeededIndex::new(
        InMemoryRoster::from_names(&roster, &config.index),
        &config.index,
    ));

    let mut pipeline = config.clone();
    if args.offline {
        pipeline.extractor.resolve_identities = false;
    }
    if args.include_entities {
        pipeline.extractor.include_entities = true;
    }

    let resolver = if pipeline.extractor.resolve_identities {
        let registry = MusicBrainzRegistry::new(&pipeline.resolver)?;
        Some(Arc::new(IdentityResolver::new(registry, pipeline.resolver.clone())))
    } else {
        None
    };

    let request = ExtractionRequest::new(&args.subject, &args.source, sections).with_structured(structured);

    match args.scorer {
        ScorerArg::Heuristic => {
            let scorer = HeuristicScorer::new(pipeline.scorer.clone());
            run_with(scorer, index, resolver, &pipeline, request).await
        }
        ScorerArg::Null => run_with(NullScorer, index, resolver, &pipeline, request).await,
    }
}

async fn run_with<S>(
    scorer: S,
    index: Arc<SeededIndex<InMemoryRoster>>,
    resolver: Option<Arc<IdentityResolver>>,
    config: &EngineConfig,
    request: ExtractionRequest,
) -> Result<(ExtractionRun, Vec<InfluenceResult>)>
where
    S: ClaimScorer + Send + Sync + 'static,
    S::Error: Display,
{
    let mut extractor =
        Extractor::new(scorer, index, config.extractor.clone()).with_aggregation(config.aggregation.clone());
    if let Some(resolver) = resolver {
        extractor = extractor.with_resolver(resolver);
    }

    let run = extractor.run(request).await?;
    let ranked = extractor.rank(std::slice::from_ref(&run));
    Ok((run, ranked))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn json_file(value: serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    fn args(sections: PathBuf, scorer: ScorerArg) -> ExtractArgs {
        ExtractArgs {
            sections,
            subject: "He".to_string(),
            source: "wikipedia".to_string(),
            roster: None,
            structured: None,
            offline: true,
            include_entities: false,
            scorer,
        }
    }

    fn scenario_sections() -> NamedTempFile {
        json_file(serde_json::json!([{
            "source": "wikipedia",
            "section_path": "Interviews",
            "text": "He said the band was heavily influenced by The Beatles and Radiohead."
        }]))
    }

    #[tokio::test]
    async fn test_offline_heuristic_run() {
        let sections = scenario_sections();
        let (run, ranked) = run_extract(&args(sections.path().to_path_buf(), ScorerArg::Heuristic), &EngineConfig::default())
            .await
            .unwrap();

        assert_eq!(run.scored.len(), 2);
        let names: Vec<_> = ranked.iter().map(|r| r.influence_artist.as_str()).collect();
        assert_eq!(names, vec!["Beatles", "Radiohead"]);
        assert_eq!(ranked[0].score, 0.8);
    }

    #[tokio::test]
    async fn test_null_scorer_with_structured_triples() {
        let sections = scenario_sections();
        let structured = json_file(serde_json::json!([
            { "influencer_id": "Q1299", "influencer_label": "The Beatles" }
        ]));
        let mut args = args(sections.path().to_path_buf(), ScorerArg::Null);
        args.structured = Some(structured.path().to_path_buf());

        let (run, ranked) = run_extract(&args, &EngineConfig::default()).await.unwrap();

        assert_eq!(run.scored.len(), 3);
        assert!(run.scored.iter().all(|c| c.claim_probability == 1.0));
        assert!(ranked.iter().any(|r| r.influence_artist == "The Beatles"));
    }

    #[tokio::test]
    async fn test_missing_sections_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_extract(&args(dir.path().join("missing.json"), ScorerArg::Heuristic), &EngineConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_sections_file() {
        let sections = json_file(serde_json::json!({ "not": "a list" }));
        let err = run_extract(&args(sections.path().to_path_buf(), ScorerArg::Heuristic), &EngineConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Serialization(_)));
    }
}
