//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tributary CLI - Extract and rank musical influences from evidence text.
#[derive(Debug, Parser)]
#[command(name = "tributary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.tributary/config.toml)
    #[arg(short, long, global = true, env = "TRIBUTARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "tributary_extractor=debug"
    #[arg(long, global = true, env = "TRIBUTARY_LOG", default_value = "warn")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract, score and rank influences from evidence sections
    Extract(ExtractArgs),

    /// Print the name variants generated from a roster
    Variants(VariantsArgs),

    /// Decide whether evidence or claims need refreshing
    Plan(PlanArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// JSON file with an array of evidence sections
    #[arg(long)]
    pub sections: PathBuf,

    /// Artist whose influences are extracted
    #[arg(long)]
    pub subject: String,

    /// Source channel the claims belong to
    #[arg(long, default_value = "wikipedia")]
    pub source: String,

    /// Roster file, one artist name per line
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// JSON file with knowledge-base "influenced by" triples
    #[arg(long)]
    pub structured: Option<PathBuf>,

    /// Skip identity resolution against the registry
    #[arg(long)]
    pub offline: bool,

    /// Emit every person/organization entity as a candidate
    #[arg(long)]
    pub include_entities: bool,

    /// Scorer used for claim probabilities
    #[arg(long, value_enum, default_value = "heuristic")]
    pub scorer: ScorerArg,
}

/// Arguments for the variants command.
#[derive(Debug, Parser)]
pub struct VariantsArgs {
    /// Roster file, one artist name per line
    #[arg(long)]
    pub roster: PathBuf,
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    /// Source channel
    #[arg(long)]
    pub source: String,

    /// Age of the newest stored evidence, in seconds (omit if none)
    #[arg(long)]
    pub evidence_age_secs: Option<u64>,

    /// Extraction version of the stored claims (omit if none)
    #[arg(long)]
    pub stored_version: Option<String>,
}

/// Scorer choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScorerArg {
    /// Probability by cue strength
    Heuristic,
    /// Every candidate scores 1.0
    Null,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "tributary",
            "extract",
            "--sections",
            "sections.json",
            "--subject",
            "Radiohead",
            "--offline",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.subject, "Radiohead");
                assert_eq!(args.source, "wikipedia");
                assert!(args.offline);
                assert_eq!(args.scorer, ScorerArg::Heuristic);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["tributary", "variants", "--roster", "names.txt", "--format", "json"]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(matches!(cli.command, Command::Variants(_)));
    }

    #[test]
    fn test_plan_command() {
        let cli = Cli::parse_from(["tributary", "plan", "--source", "youtube", "--evidence-age-secs", "60"]);
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.evidence_age_secs, Some(60));
                assert!(args.stored_version.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["tributary"]).is_err());
    }
}
