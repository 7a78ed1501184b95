//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tributary_domain::{InfluenceResult, NameVariantEntry, RefreshPlan};
use tributary_extractor::ExtractionRun;

const SNIPPET_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a ranked influence list.
    pub fn format_influences(&self, influences: &[InfluenceResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(influences)?),
            OutputFormat::Table => Ok(self.format_influences_table(influences)),
        }
    }

    fn format_influences_table(&self, influences: &[InfluenceResult]) -> String {
        if influences.is_empty() {
            return self.colorize("No influences found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Rank", "Influence", "Score", "Evidence", "Pattern", "Snippet"]);

        for (rank, influence) in influences.iter().enumerate() {
            let best = influence.evidence.first();
            builder.push_record([
                (rank + 1).to_string(),
                influence.influence_artist.clone(),
                format!("{:.3}", influence.score),
                influence.evidence_count.to_string(),
                best.map(|e| e.pattern_type.clone()).unwrap_or_default(),
                best.map(|e| truncate(&e.snippet, SNIPPET_WIDTH)).unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a finished extraction run with its ranking.
    ///
    /// JSON output carries the run metadata and every scored claim; table
    /// output shows the ranking followed by a one-line summary.
    pub fn format_run(&self, run: &ExtractionRun, ranked: &[InfluenceResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "subject": run.subject,
                    "source": run.source,
                    "metadata": run.metadata,
                    "claims": run.scored,
                    "influences": ranked,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let summary = format!(
                    "{} claim(s) for '{}' from '{}' ({} section(s), {} ms)",
                    run.scored.len(),
                    run.subject,
                    run.source,
                    run.metadata.sections_processed,
                    run.metadata.processing_time_ms
                );
                Ok(format!("{}\n{}", self.format_influences_table(ranked), self.info(&summary)))
            }
        }
    }

    /// Format generated name variants.
    pub fn format_variants(&self, variants: &[NameVariantEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = variants
                    .iter()
                    .map(|v| {
                        serde_json::json!({
                            "canonical_name": v.canonical_name,
                            "variant_norm": v.variant_norm,
                            "match_form": v.match_form,
                            "token_count": v.token_count,
                            "provenance": v.provenance,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if variants.is_empty() {
                    return Ok(self.colorize("No variants generated.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Variant", "Form", "Bucket", "Tokens"]);
                for v in variants {
                    builder.push_record([
                        v.canonical_name.clone(),
                        v.variant_norm.clone(),
                        v.match_form.to_string(),
                        v.first_token().unwrap_or_default().to_string(),
                        v.token_count.to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a refresh decision.
    pub fn format_plan(&self, source: &str, plan: RefreshPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "source": source,
                "needs_ingest": plan.needs_ingest,
                "needs_extract": plan.needs_extract,
            }))?),
            OutputFormat::Table => Ok(match (plan.needs_ingest, plan.needs_extract) {
                (true, _) => self.warning(&format!("{}: evidence must be re-ingested and claims re-extracted", source)),
                (false, true) => self.warning(&format!("{}: claims must be re-extracted", source)),
                (false, false) => self.success(&format!("{}: evidence and claims are current", source)),
            }),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten text to at most `width` characters, marking the cut with "…".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
