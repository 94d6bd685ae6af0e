// Transient in-memory cache with per-entry TTL.
// Expiry is lazy: an expired entry is evicted when the normal read path
// observes it. There is no background sweep and no size bound; the key space
// is small and lives for a single session.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default TTL for transient entries: 5 minutes.
pub const DEFAULT_MEMORY_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached value with its storage time and time-to-live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub stored_at: DateTime<Utc>,
    /// TTL in milliseconds. An entry is valid iff `now - stored_at <= ttl`.
    pub ttl_ms: u64,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Utc::now(),
            ttl_ms: ttl.as_millis() as u64,
        }
    }

    /// Check whether this entry has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > Duration::from_millis(self.ttl_ms)
    }

    pub fn is_fresh(&self) -> bool {
        !self.is_expired()
    }
}

/// Generic key/value store with lazy TTL expiry.
#[derive(Debug)]
pub struct MemoryCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    default_ttl: Duration,
}

impl<T: Clone> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryCache<T> {
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_MEMORY_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Get a value if present and fresh. An expired entry is evicted and
    /// treated as absent, so callers never observe stale data here.
    pub fn get(&mut self, key: &str) -> Option<T> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh() => Some(entry.data.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Get a fresh value without evicting on expiry. Used ahead of a refresh
    /// attempt so a stale entry survives for `peek_stale` fallback.
    pub fn peek(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.data.clone())
    }

    /// Get a value regardless of expiry. This is the stale-fallback read
    /// taken when a live refresh fails.
    pub fn peek_stale(&self, key: &str) -> Option<T> {
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    /// Store a value under the default TTL.
    pub fn set(&mut self, key: impl Into<String>, data: T) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, data, ttl);
    }

    pub fn set_with_ttl(&mut self, key: impl Into<String>, data: T, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(data, ttl));
    }

    /// Check presence, with the same lazy expiry as `get`.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
