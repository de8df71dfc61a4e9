//! Bounded cache of compiled plans.
//!
//! Keyed by pattern text and the expose-handles flag. Lookups share a read
//! lock; compilation on a miss happens without holding any lock, so two
//! threads missing on the same pattern may both compile it. The first insert
//! wins and the second caller receives the stored plan.

use std::string::String;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::compiled::{CompiledPlan, compile_pattern};
use crate::error::EinfuncResult;

/// Default number of plans kept by [`PlanCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanKey {
    pattern: String,
    expose_handles: bool,
}

impl PlanKey {
    fn new(pattern: &str, expose_handles: bool) -> Self {
        Self {
            pattern: String::from(pattern),
            expose_handles,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    plan: Arc<CompiledPlan>,
    last_accessed: AtomicU64,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub evictions: u64,
}

/// Least-recently-used cache of compiled plans.
#[derive(Debug)]
pub struct PlanCache {
    capacity: usize,
    entries: RwLock<HashMap<PlanKey, CacheEntry>>,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl PlanCache {
    /// Creates a cache holding at most `capacity` plans.
    ///
    /// A capacity of zero disables caching: every lookup compiles.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(HashMap::new()),
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Returns the maximum number of plans kept.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of cached plans.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the cached plan for a pattern, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        expose_handles: bool,
    ) -> EinfuncResult<Arc<CompiledPlan>> {
        if self.capacity == 0 {
            return compile_pattern(pattern, expose_handles).map(Arc::new);
        }

        let key = PlanKey::new(pattern, expose_handles);
        if let Some(plan) = self.lookup(&key) {
            return Ok(plan);
        }

        let plan = Arc::new(compile_pattern(pattern, expose_handles)?);
        Ok(self.insert(key, plan))
    }

    fn lookup(&self, key: &PlanKey) -> Option<Arc<CompiledPlan>> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) => {
                entry.last_accessed.store(self.tick(), Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::trace!("plan cache hit for '{}'", key.pattern);
                Some(Arc::clone(&entry.plan))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::trace!("plan cache miss for '{}'", key.pattern);
                None
            }
        }
    }

    fn insert(&self, key: PlanKey, plan: Arc<CompiledPlan>) -> Arc<CompiledPlan> {
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());

            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                log::debug!("plan cache evicted '{}'", oldest.pattern);
            }
        }

        let tick = self.tick();
        match entries.entry(key) {
            Entry::Occupied(existing) => Arc::clone(&existing.get().plan),
            Entry::Vacant(slot) => {
                slot.insert(CacheEntry {
                    plan: Arc::clone(&plan),
                    last_accessed: AtomicU64::new(tick),
                });
                plan
            }
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Drops every cached plan. Statistics are kept.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
