//! Plan command implementation.

use crate::cli::PlanArgs;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::output::Formatter;
use std::time::{SystemTime, UNIX_EPOCH};
use tributary_domain::RefreshPlan;

/// Execute the plan command.
pub fn execute_plan(args: PlanArgs, config: &EngineConfig, formatter: &Formatter) -> Result<()> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let plan = plan_at(&args, config, now);

    println!("{}", formatter.format_plan(&args.source, plan)?);
    Ok(())
}

fn plan_at(args: &PlanArgs, config: &EngineConfig, now: u64) -> RefreshPlan {
    let evidence_last_updated = args.evidence_age_secs.map(|age| now.saturating_sub(age));
    config
        .refresh
        .plan(&args.source, evidence_last_updated, args.stored_version.as_deref(), now)
}
