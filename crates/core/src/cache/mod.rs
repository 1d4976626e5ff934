//! In-memory result cache with a fixed time-to-live.
//!
//! One cache object is built at process start and shared by handle with the
//! request path. Entries are keyed by the raw query string and evicted lazily:
//! a read that finds an entry older than the TTL removes it and reports a miss.
//! There is no background sweep and nothing is persisted.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default entry lifetime (10 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

/// Process-lifetime key/value store with lazy TTL eviction.
///
/// Reads and writes are serialized through a single lock, so concurrent
/// requests for the same key resolve to last-writer-wins.
#[derive(Debug)]
pub struct ResultCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ResultCache<V> {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Look up a fresh value.
    ///
    /// An entry older than the TTL is removed and treated as absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;

        if entry.created_at.elapsed() > self.ttl {
            tracing::debug!(key, "cache entry expired");
            entries.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    /// Store a value, replacing any existing entry and resetting its age.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry { value, created_at: Instant::now() };
        self.entries.lock().await.insert(key.into(), entry);
    }

    /// Number of stored entries, including stale ones not yet read.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
