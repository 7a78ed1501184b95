//! In-memory roster source

use crate::config::IndexConfig;
use crate::variants::{build_variants, normalize_denylist};
use std::convert::Infallible;
use tributary_domain::traits::RosterSource;
use tributary_domain::VariantRecord;

/// A roster held in memory, already expanded into variant rows
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    records: Vec<VariantRecord>,
}

impl InMemoryRoster {
    /// Seed from plain artist names using the configured denylist
    pub fn from_names<S: AsRef<str>>(names: &[S], config: &IndexConfig) -> Self {
        let denylist = normalize_denylist(&config.denylist);
        let records = build_variants(names, &denylist, &config.provenance)
            .iter()
            .map(VariantRecord::from)
            .collect();
        Self { records }
    }

    /// Wrap already-persisted variant rows
    pub fn from_records(records: Vec<VariantRecord>) -> Self {
        Self { records }
    }

    /// Variant rows
    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }
}

impl RosterSource for InMemoryRoster {
    type Error = Infallible;

    fn load_variants(&self) -> Result<Vec<VariantRecord>, Self::Error> {
        Ok(self.records.clone())
    }
}
