//! Cross-method candidate canonicalization and deduplication
//!
//! Every candidate of a section is resolved against the identity registry
//! (when a resolver is configured). Resolved candidates take the registry's
//! display name and dedupe on the registry id; unresolved ones dedupe on
//! their normalized name. Raw entity-pass candidates survive only when
//! resolved.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use tributary_domain::{normalize_text, CandidateMethod, ExtractedCandidate};
use tributary_identity::IdentityResolver;

/// Identity a candidate is deduplicated on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupeKey {
    /// Registry identifier
    Id(String),
    /// Normalized influence name
    Name(String),
}

/// Dedup key for a candidate, or `None` when it must be discarded
///
/// Unresolved entity-pass candidates and candidates without a usable name
/// have no key.
pub fn dedupe_key(candidate: &ExtractedCandidate) -> Option<DedupeKey> {
    if let Some(id) = &candidate.resolved_id {
        return Some(DedupeKey::Id(id.clone()));
    }
    if candidate.method == CandidateMethod::Entity {
        return None;
    }
    let name = normalize_text(&candidate.influence_artist);
    (!name.is_empty()).then_some(DedupeKey::Name(name))
}

/// Keep the first candidate per key, in input order
pub fn dedupe(candidates: Vec<ExtractedCandidate>) -> Vec<ExtractedCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| match dedupe_key(c) {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}

/// Text sent to the registry for a candidate.
///
/// Literal matches resolve their roster name; everything else resolves the
/// text as it appeared.
pub fn resolution_query(candidate: &ExtractedCandidate) -> &str {
    match candidate.method {
        CandidateMethod::StringMatch => &candidate.influence_artist,
        _ => &candidate.mention_text,
    }
}

/// Resolves and deduplicates the candidates of one section
#[derive(Clone, Default)]
pub struct Canonicalizer {
    resolver: Option<Arc<IdentityResolver>>,
}

impl Canonicalizer {
    /// Canonicalizer backed by an identity resolver
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// Canonicalizer that never resolves; keys are normalized names
    pub fn offline() -> Self {
        Self::default()
    }

    /// Whether a resolver is attached
    pub fn is_online(&self) -> bool {
        self.resolver.is_some()
    }

    /// Resolve one candidate, leaving it untouched on a miss
    pub async fn resolve(&self, candidate: ExtractedCandidate) -> ExtractedCandidate {
        let Some(resolver) = &self.resolver else {
            return candidate;
        };
        match resolver.resolve(resolution_query(&candidate)).await {
            Some(artist) => candidate.resolved(artist.id, artist.canonical_name),
            None => candidate,
        }
    }

    /// Resolve every candidate concurrently, then dedupe in input order
    pub async fn canonicalize(&self, candidates: Vec<ExtractedCandidate>) -> Vec<ExtractedCandidate> {
        let found = candidates.len();
        let resolved = join_all(candidates.into_iter().map(|c| self.resolve(c))).await;
        let kept = dedupe(resolved);
        debug!(found, kept = kept.len(), online = self.is_online(), "Canonicalized section candidates");
        kept
    }
}
