//! Deterministic in-memory registry for tests and offline runs

use crate::error::RegistryError;
use crate::registry::{ArtistMatch, IdentityRegistry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tributary_domain::normalize_key;

/// Mock registry
///
/// Search results are keyed by normalized query. Clones share their call
/// counters and failure budget, so a test can hand one clone to the
/// resolver and inspect the other.
///
/// # Examples
///
/// ```
/// use tributary_identity::{IdentityRegistry, MockRegistry};
///
/// let registry = MockRegistry::new().with_artist("The Beatles", "b10bbbfc", 100);
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let hits = rt.block_on(registry.search_artist("the beatles")).unwrap();
/// assert_eq!(hits[0].id, "b10bbbfc");
/// assert_eq!(registry.search_calls(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    searches: HashMap<String, Vec<ArtistMatch>>,
    names: HashMap<String, String>,
    delay: Duration,
    failures_left: Arc<AtomicUsize>,
    search_calls: Arc<AtomicUsize>,
    lookup_calls: Arc<AtomicUsize>,
}

impl MockRegistry {
    /// Empty registry: every search misses, every lookup is unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artist findable by its own name, with a known id
    pub fn with_artist(mut self, name: &str, id: &str, score: u32) -> Self {
        self.searches
            .entry(normalize_key(name))
            .or_default()
            .push(ArtistMatch::new(id, name, score));
        self.names.insert(id.to_string(), name.to_string());
        self
    }

    /// Register a search hit only; the id stays unknown to lookups
    pub fn with_match(mut self, query: &str, id: &str, name: &str, score: u32) -> Self {
        self.searches
            .entry(normalize_key(query))
            .or_default()
            .push(ArtistMatch::new(id, name, score));
        self
    }

    /// Delay every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail the next `n` calls with a transient network error
    pub fn failing_times(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Number of search calls made
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of lookup calls made
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    async fn simulate(&self) -> Result<(), RegistryError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(RegistryError::Network("mock connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityRegistry for MockRegistry {
    async fn search_artist(&self, name: &str) -> Result<Vec<ArtistMatch>, RegistryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self.searches.get(&normalize_key(name)).cloned().unwrap_or_default())
    }

    async fn lookup_artist(&self, id: &str) -> Result<Option<String>, RegistryError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self.names.get(id).cloned())
    }
}
