use crate::clock::Clock;
use crate::clock::elapsed_since;
use chrono::DateTime;
use chrono::Utc;
use log::debug;
use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// A cached value together with the time it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        elapsed_since(self.created_at, now) > self.ttl
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
}

/// Size-bounded cache whose entries expire a fixed time after insertion.
///
/// Expiry is lazy: an expired entry is dropped by the `get` that finds it.
/// Reads never change recency, so the least-recently-used slot of the
/// underlying [`LruCache`] is always the entry with the oldest `created_at`,
/// and that is the one evicted when a new key arrives at capacity.
pub struct TtlCache<K, V> {
    entries: RwLock<LruCache<K, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Hash + Eq, V: Clone> TtlCache<K, V> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
            clock,
        }
    }

    /// Look up a live entry. Expired entries are removed and reported absent.
    pub async fn get(&self, key: &K) -> Option<CacheEntry<V>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.peek(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.clone()),
                Some(_) => {}
            }
        }

        // Another writer may have refreshed the key between the two locks.
        let mut entries = self.entries.write().await;
        match entries.peek(key).map(|entry| entry.is_expired(now)) {
            Some(true) => {
                entries.pop(key);
                debug!("Dropped expired cache entry ({} remaining)", entries.len());
                None
            }
            Some(false) => entries.peek(key).cloned(),
            None => None,
        }
    }

    /// Store `value` under `key`, stamped with the current time.
    ///
    /// Returns the key evicted to make room, if any. Replacing an existing
    /// key never evicts.
    pub async fn set(&self, key: K, value: V) -> Option<K> {
        let entry = CacheEntry {
            value,
            created_at: self.clock.now(),
            ttl: self.ttl,
        };

        let mut entries = self.entries.write().await;
        let mut evicted = None;
        if !entries.contains(&key) && entries.len() >= entries.cap().get() {
            evicted = entries.pop_lru().map(|(oldest, _)| oldest);
            debug!("Cache at capacity ({}), evicted oldest entry", entries.cap());
        }
        entries.put(key, entry);
        evicted
    }

    pub async fn invalidate(&self, key: &K) -> bool {
        self.entries.write().await.pop(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}
