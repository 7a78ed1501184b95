//! In-memory claim store

use std::collections::HashMap;
use std::convert::Infallible;
use tributary_domain::traits::ClaimStore;
use tributary_domain::ScoredCandidate;

/// Claim store held in a map, keyed by (subject, lowercase source)
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    claims: HashMap<(String, String), Vec<ScoredCandidate>>,
}

impl InMemoryClaimStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn key(subject: &str, source: &str) -> (String, String) {
        (subject.to_string(), source.to_lowercase())
    }

    /// Every stored claim for a subject, across sources
    pub fn all_for_subject(&self, subject: &str) -> Vec<ScoredCandidate> {
        let mut keys: Vec<_> = self.claims.keys().filter(|(s, _)| s == subject).collect();
        keys.sort();
        keys.into_iter()
            .flat_map(|k| self.claims[k].iter().cloned())
            .collect()
    }

    /// Total number of stored claims
    pub fn len(&self) -> usize {
        self.claims.values().map(Vec::len).sum()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClaimStore for InMemoryClaimStore {
    type Error = Infallible;

    fn replace_claims(
        &mut self,
        subject: &str,
        source: &str,
        claims: Vec<ScoredCandidate>,
    ) -> Result<(), Self::Error> {
        self.claims.insert(Self::key(subject, source), claims);
        Ok(())
    }

    fn claims_for(&self, subject: &str, source: &str) -> Result<Vec<ScoredCandidate>, Self::Error> {
        Ok(self
            .claims
            .get(&Self::key(subject, source))
            .cloned()
            .unwrap_or_default())
    }
}
