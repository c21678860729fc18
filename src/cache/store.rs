//! Cache Store Module
//!
//! Expiry-aware key/value store guarded by a reader/writer lock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::entry::current_timestamp;
use crate::cache::stats::StatsCounters;
use crate::cache::{Cache, CacheEntry, CacheStats};
use crate::error::CacheError;

// == Expiring Cache ==
/// In-memory cache where every entry carries an absolute expiry instant.
///
/// Expired entries are invisible to reads immediately and are physically
/// removed by [`Cache::remove_expired_entries`], normally driven by
/// [`crate::tasks::spawn_sweep_task`].
#[derive(Debug)]
pub struct ExpiringCache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Read and reclamation counters
    stats: StatsCounters,
}

impl<V> ExpiringCache<V> {
    // == Constructor ==
    /// Creates an empty cache with no background sweep attached.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsCounters::default(),
        }
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    // No operation panics while holding a guard, so a poisoned lock still
    // protects a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Cache<V> for ExpiringCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let now = current_timestamp();
        let entries = self.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn set(&self, key: &str, value: V, expires_at: i64) -> Result<(), CacheError> {
        if key.trim().is_empty() {
            return Err(CacheError::EmptyKey);
        }

        self.write()
            .insert(key.to_string(), CacheEntry::new(value, expires_at));
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.write().remove(key);
    }

    fn exists(&self, key: &str) -> bool {
        let now = current_timestamp();
        let live = self
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now));

        if live {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        live
    }

    fn clear(&self) {
        self.write().clear();
    }

    fn remove_expired_entries(&self) -> usize {
        let now = current_timestamp();
        let mut entries = self.write();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        self.stats.record_reclaimed(removed);
        removed
    }
}
