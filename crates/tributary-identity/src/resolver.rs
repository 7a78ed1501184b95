//! Identity resolution with caching, coalescing, rate limiting and retry

use crate::cache::ResolutionCache;
use crate::config::ResolverConfig;
use crate::error::RegistryError;
use crate::rate_limit::RateLimiter;
use crate::registry::{ArtistMatch, IdentityRegistry};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use tributary_domain::normalize_key;

/// A name resolved to a registry identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    /// Registry identifier
    pub id: String,
    /// Registry display name, when the id lookup succeeded
    pub canonical_name: Option<String>,
}

/// Maps free-text names to registry ids and ids back to display names.
///
/// One instance is meant to be shared (behind an `Arc`) by every
/// extraction in the process. Failures never surface as errors: they are
/// logged and cached as misses under the negative TTL.
pub struct IdentityResolver {
    registry: Arc<dyn IdentityRegistry>,
    config: ResolverConfig,
    limiter: RateLimiter,
    names: ResolutionCache,
    ids: ResolutionCache,
}

impl IdentityResolver {
    /// Create a resolver over `registry`
    pub fn new(registry: impl IdentityRegistry + 'static, config: ResolverConfig) -> Self {
        Self::from_arc(Arc::new(registry), config)
    }

    /// Create a resolver over a shared registry
    pub fn from_arc(registry: Arc<dyn IdentityRegistry>, config: ResolverConfig) -> Self {
        let secs = Duration::from_secs;
        Self {
            limiter: RateLimiter::new(config.min_interval()),
            names: ResolutionCache::new(
                "name_to_id",
                secs(config.name_positive_ttl_secs),
                secs(config.name_negative_ttl_secs),
            ),
            ids: ResolutionCache::new(
                "id_to_name",
                secs(config.id_positive_ttl_secs),
                secs(config.id_negative_ttl_secs),
            ),
            registry,
            config,
        }
    }

    /// Resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Registry identifier for a free-text name.
    ///
    /// The top search hit is accepted only if its score reaches the
    /// configured threshold; anything else is a miss.
    pub async fn resolve_id(&self, name: &str) -> Option<String> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        let query = name.trim();

        self.names
            .get_or_resolve(&key, || async move {
                match self.call(|| self.registry.search_artist(query)).await {
                    Ok(matches) => self.accept(query, matches),
                    Err(e) => {
                        warn!(name = %query, error = %e, "Artist search failed");
                        None
                    }
                }
            })
            .await
    }

    /// Registry display name for an identifier
    pub async fn canonical_name(&self, id: &str) -> Option<String> {
        let key = id.trim();
        if key.is_empty() {
            return None;
        }

        self.ids
            .get_or_resolve(key, || async move {
                match self.call(|| self.registry.lookup_artist(key)).await {
                    Ok(name) => name.filter(|n| !n.trim().is_empty()),
                    Err(e) => {
                        warn!(id = %key, error = %e, "Artist lookup failed");
                        None
                    }
                }
            })
            .await
    }

    /// Resolve a name to an id, then the id to its display name
    pub async fn resolve(&self, name: &str) -> Option<ResolvedArtist> {
        let id = self.resolve_id(name).await?;
        let canonical_name = self.canonical_name(&id).await;
        Some(ResolvedArtist { id, canonical_name })
    }

    /// Drop every cached result
    pub fn clear_caches(&self) {
        self.names.clear();
        self.ids.clear();
    }

    fn accept(&self, query: &str, matches: Vec<ArtistMatch>) -> Option<String> {
        let top = matches.into_iter().next()?;
        if top.score < self.config.score_threshold || top.id.trim().is_empty() {
            debug!(
                name = %query,
                score = top.score,
                threshold = self.config.score_threshold,
                "Top match below threshold"
            );
            return None;
        }
        debug!(name = %query, id = %top.id, score = top.score, "Resolved artist");
        Some(top.id)
    }

    /// One rate-limited registry call, retried once on a transient failure
    async fn call<T, F, Fut>(&self, mut op: F) -> Result<T, RegistryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RegistryError>>,
    {
        self.limiter.wait().await;
        match op().await {
            Err(e) if e.is_transient() => {
                debug!(error = %e, "Transient registry failure, retrying once");
                tokio::time::sleep(self.config.retry_backoff()).await;
                self.limiter.wait().await;
                op().await
            }
            other => other,
        }
    }
}
