//! Refresh policy for stored evidence and extracted claims
//!
//! Decides whether a (subject, source) pair needs its evidence re-ingested,
//! its claims re-extracted, or neither. Timestamps are Unix seconds.

use crate::section::sources;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag of the current extraction rules.
///
/// Claims stored under any other version are re-extracted.
pub const CURRENT_EXTRACTION_VERSION: &str = "cue-rules-v1";

const DAY_SECS: u64 = 86_400;

/// What a caller must do before serving a ranked list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefreshPlan {
    /// Evidence sections are missing or expired
    pub needs_ingest: bool,
    /// Claims are missing, expired, or from an older rule version
    pub needs_extract: bool,
}

/// Evidence TTLs per source and the active extraction version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPolicy {
    /// Version tag claims must carry to be considered current
    pub extraction_version: String,
    /// Evidence TTL per lowercase source tag (seconds)
    pub source_ttl_secs: BTreeMap<String, u64>,
    /// TTL for sources not listed above (seconds)
    pub default_ttl_secs: u64,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        let mut source_ttl_secs = BTreeMap::new();
        source_ttl_secs.insert(sources::WIKIPEDIA.to_string(), DAY_SECS);
        source_ttl_secs.insert(sources::WIKIDATA.to_string(), 7 * DAY_SECS);
        source_ttl_secs.insert(sources::YOUTUBE.to_string(), 7 * DAY_SECS);

        Self {
            extraction_version: CURRENT_EXTRACTION_VERSION.to_string(),
            source_ttl_secs,
            default_ttl_secs: DAY_SECS,
        }
    }
}

impl RefreshPolicy {
    /// Evidence TTL for a source tag (case-insensitive)
    pub fn ttl_for(&self, source: &str) -> u64 {
        self.source_ttl_secs
            .get(&source.to_lowercase())
            .copied()
            .unwrap_or(self.default_ttl_secs)
    }

    /// Decide what needs refreshing.
    ///
    /// # Arguments
    /// * `source` - Source channel tag
    /// * `evidence_last_updated` - Newest evidence timestamp, if any evidence exists
    /// * `stored_version` - Extraction version of stored claims, if any
    /// * `now` - Current time
    pub fn plan(
        &self,
        source: &str,
        evidence_last_updated: Option<u64>,
        stored_version: Option<&str>,
        now: u64,
    ) -> RefreshPlan {
        let Some(updated) = evidence_last_updated else {
            return RefreshPlan {
                needs_ingest: true,
                needs_extract: true,
            };
        };

        if now.saturating_sub(updated) > self.ttl_for(source) {
            return RefreshPlan {
                needs_ingest: true,
                needs_extract: true,
            };
        }

        let needs_extract = match stored_version {
            None => true,
            Some(version) => version != self.extraction_version,
        };

        RefreshPlan {
            needs_ingest: false,
            needs_extract,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_no_evidence_needs_everything() {
        let plan = RefreshPolicy::default().plan("wikipedia", None, Some(CURRENT_EXTRACTION_VERSION), NOW);
        assert!(plan.needs_ingest && plan.needs_extract);
    }

    #[test]
    fn test_expired_evidence_needs_everything() {
        let policy = RefreshPolicy::default();
        let plan = policy.plan("wikipedia", Some(NOW - 2 * DAY_SECS), Some(CURRENT_EXTRACTION_VERSION), NOW);
        assert!(plan.needs_ingest && plan.needs_extract);

        // Same age is still fresh for youtube (7 day TTL)
        let plan = policy.plan("youtube", Some(NOW - 2 * DAY_SECS), Some(CURRENT_EXTRACTION_VERSION), NOW);
        assert_eq!(plan, RefreshPlan::default());
    }

    #[test]
    fn test_missing_or_old_version_needs_extract_only() {
        let policy = RefreshPolicy::default();
        let plan = policy.plan("wikidata", Some(NOW - 60), None, NOW);
        assert_eq!(plan, RefreshPlan { needs_ingest: false, needs_extract: true });

        let plan = policy.plan("wikidata", Some(NOW - 60), Some("cue-rules-v0"), NOW);
        assert_eq!(plan, RefreshPlan { needs_ingest: false, needs_extract: true });
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let plan = RefreshPolicy::default().plan("wikipedia", Some(NOW + 10), Some(CURRENT_EXTRACTION_VERSION), NOW);
        assert_eq!(plan, RefreshPlan::default());
    }

    #[test]
    fn test_unknown_source_uses_default_ttl() {
        let policy = RefreshPolicy::default();
        assert_eq!(policy.ttl_for("Podcast"), DAY_SECS);
        assert_eq!(policy.ttl_for("YouTube"), 7 * DAY_SECS);
    }
}
