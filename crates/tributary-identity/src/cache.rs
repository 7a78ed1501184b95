//! Single-flight TTL cache for resolution results
//!
//! Values are `Option<String>`: `Some` is a resolved value, `None` a cached
//! miss. Misses are kept for the negative TTL so a registry outage or an
//! unknown name is not retried on every call.
//!
//! Lock order is `in_flight` then `entries`; neither lock is held across an
//! await.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheItem {
    value: Option<String>,
    expires_at: Instant,
}

type Pending = watch::Receiver<Option<Option<String>>>;

/// TTL cache with per-key request coalescing
#[derive(Debug)]
pub struct ResolutionCache {
    name: &'static str,
    positive_ttl: Duration,
    negative_ttl: Duration,
    entries: Mutex<HashMap<String, CacheItem>>,
    in_flight: Mutex<HashMap<String, Pending>>,
}

enum Role {
    Leader(watch::Sender<Option<Option<String>>>),
    Follower(Pending),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // entries are replaced whole, so a poisoned map is still consistent
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Removes the in-flight entry when the leader finishes or is dropped
struct InFlightGuard<'a> {
    cache: &'a ResolutionCache,
    key: &'a str,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(&self.cache.in_flight).remove(self.key);
    }
}

impl ResolutionCache {
    /// Create a cache; `name` labels log lines
    pub fn new(name: &'static str, positive_ttl: Duration, negative_ttl: Duration) -> Self {
        Self {
            name,
            positive_ttl,
            negative_ttl,
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Unexpired cached value for `key`.
    ///
    /// The outer `Option` is hit/miss; the inner one is the cached result.
    pub fn cached(&self, key: &str) -> Option<Option<String>> {
        let entries = lock(&self.entries);
        entries
            .get(key)
            .filter(|item| item.expires_at > Instant::now())
            .map(|item| item.value.clone())
    }

    /// Store a result, choosing the TTL by whether it resolved
    pub fn insert(&self, key: &str, value: Option<String>) {
        let ttl = if value.is_some() {
            self.positive_ttl
        } else {
            self.negative_ttl
        };
        let item = CacheItem {
            value,
            expires_at: Instant::now() + ttl,
        };
        lock(&self.entries).insert(key.to_string(), item);
    }

    /// Cached value for `key`, or the result of `resolve`.
    ///
    /// Concurrent callers for the same key share one `resolve` call: the
    /// first caller runs it and publishes the result, the rest wait for it.
    /// If the running caller is dropped before finishing, a waiter takes
    /// over.
    pub async fn get_or_resolve<F, Fut>(&self, key: &str, resolve: F) -> Option<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        loop {
            if let Some(hit) = self.cached(key) {
                debug!(cache = self.name, key = %key, "Cache hit");
                return hit;
            }

            let role = {
                let mut in_flight = lock(&self.in_flight);
                // a leader may have finished since the check above
                if let Some(hit) = self.cached(key) {
                    return hit;
                }
                match in_flight.get(key) {
                    Some(pending) => Role::Follower(pending.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        in_flight.insert(key.to_string(), rx);
                        Role::Leader(tx)
                    }
                }
            };

            match role {
                Role::Follower(mut pending) => {
                    debug!(cache = self.name, key = %key, "Joining in-flight resolution");
                    if let Ok(value) = pending.wait_for(Option::is_some).await {
                        return value.clone().flatten();
                    }
                    // leader dropped without publishing; retry
                }
                Role::Leader(tx) => {
                    let _guard = InFlightGuard { cache: self, key };
                    let value = resolve().await;
                    self.insert(key, value.clone());
                    let _ = tx.send(Some(value.clone()));
                    return value;
                }
            }
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|_, item| item.expires_at > now);
        before - entries.len()
    }

    /// Drop everything
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }
}
