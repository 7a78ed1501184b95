//! Variants command implementation.

use crate::cli::VariantsArgs;
use crate::commands::read_roster;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::output::Formatter;
use tributary_index::{build_variants, normalize_denylist};

/// Execute the variants command.
pub fn execute_variants(args: VariantsArgs, config: &EngineConfig, formatter: &Formatter) -> Result<()> {
    let roster = read_roster(&args.roster)?;
    let denylist = normalize_denylist(&config.index.denylist);
    let variants = build_variants(&roster, &denylist, &config.index.provenance);

    println!("{}", formatter.format_variants(&variants)?);
    Ok(())
}
