//! TTL-cached variant index, rebuilt lazily from the roster source

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::VariantIndex;
use std::fmt::Display;
use std::sync::{Arc, Mutex, RwLock, TryLockError};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tributary_domain::traits::RosterSource;

struct Snapshot {
    index: Arc<VariantIndex>,
    built_at: Instant,
}

/// A variant index that rebuilds itself from a [`RosterSource`] once its
/// TTL expires.
///
/// Readers get an `Arc` to an immutable index. A rebuild swaps in a new
/// index; while one is running, other callers keep reading the stale one.
/// Only the very first build makes callers wait.
pub struct SeededIndex<R> {
    source: R,
    ttl: Duration,
    current: RwLock<Option<Snapshot>>,
    rebuild: Mutex<()>,
}

impl<R> SeededIndex<R>
where
    R: RosterSource,
    R::Error: Display,
{
    /// Create an index over `source`; nothing is built until first use
    pub fn new(source: R, config: &IndexConfig) -> Self {
        Self::with_ttl(source, config.ttl())
    }

    /// Create an index with an explicit TTL
    pub fn with_ttl(source: R, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: RwLock::new(None),
            rebuild: Mutex::new(()),
        }
    }

    /// Current index, rebuilding if missing or expired
    pub fn get(&self) -> Result<Arc<VariantIndex>> {
        self.load(false)
    }

    /// Current index; `force_rebuild` bypasses the TTL.
    ///
    /// A forced load waits for any running rebuild and then rebuilds again.
    pub fn load(&self, force_rebuild: bool) -> Result<Arc<VariantIndex>> {
        if !force_rebuild {
            if let Some(index) = self.fresh()? {
                return Ok(index);
            }
        }

        let _guard = match self.rebuild.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                // someone else is rebuilding; serve what we have unless forced
                if !force_rebuild {
                    if let Some(stale) = self.any()? {
                        debug!("Serving stale variant index during rebuild");
                        return Ok(stale);
                    }
                }
                self.rebuild
                    .lock()
                    .map_err(|e| IndexError::Lock(e.to_string()))?
            }
            Err(TryLockError::Poisoned(e)) => return Err(IndexError::Lock(e.to_string())),
        };

        // a rebuild may have finished while we waited
        if !force_rebuild {
            if let Some(index) = self.fresh()? {
                return Ok(index);
            }
        }

        let records = self
            .source
            .load_variants()
            .map_err(|e| IndexError::Roster(e.to_string()))?;
        let index = Arc::new(VariantIndex::from_records(records));

        info!(
            variants = index.len(),
            buckets = index.bucket_count(),
            forced = force_rebuild,
            "Built variant index"
        );

        let mut current = self
            .current
            .write()
            .map_err(|e| IndexError::Lock(e.to_string()))?;
        *current = Some(Snapshot {
            index: Arc::clone(&index),
            built_at: Instant::now(),
        });

        Ok(index)
    }

    /// Drop the cached index so the next read rebuilds
    pub fn invalidate(&self) -> Result<()> {
        let mut current = self
            .current
            .write()
            .map_err(|e| IndexError::Lock(e.to_string()))?;
        *current = None;
        Ok(())
    }

    /// Age of the cached index, if one is built
    pub fn age(&self) -> Result<Option<Duration>> {
        let current = self
            .current
            .read()
            .map_err(|e| IndexError::Lock(e.to_string()))?;
        Ok(current.as_ref().map(|s| s.built_at.elapsed()))
    }

    fn fresh(&self) -> Result<Option<Arc<VariantIndex>>> {
        let current = self
            .current
            .read()
            .map_err(|e| IndexError::Lock(e.to_string()))?;
        Ok(current
            .as_ref()
            .filter(|s| s.built_at.elapsed() < self.ttl)
            .map(|s| Arc::clone(&s.index)))
    }

    fn any(&self) -> Result<Option<Arc<VariantIndex>>> {
        let current = self
            .current
            .read()
            .map_err(|e| IndexError::Lock(e.to_string()))?;
        Ok(current.as_ref().map(|s| Arc::clone(&s.index)))
    }
}
