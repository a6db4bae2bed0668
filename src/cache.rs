//! TTL Cache - In-Memory Caching Layer
//!
//! A small thread-safe cache whose entries expire after a fixed TTL. Time
//! is always supplied by the caller (unix seconds from an injected
//! [`crate::clock::Clock`]), which keeps the cache free of global clock
//! state and makes expiry fully testable.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Entry<V> {
    value: V,
    inserted_at: i64,
}

/// Thread-safe map with per-entry TTL expiry.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, Entry<V>>>>,
    ttl_secs: i64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs,
        }
    }

    /// Fetch a live entry. Entries older than the TTL are treated as
    /// absent (and left for `purge_expired` to collect).
    pub async fn get(&self, key: &K, now: i64) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| {
            if now - entry.inserted_at < self.ttl_secs {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    pub async fn insert(&self, key: K, value: V, now: i64) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self, now: i64) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| now - entry.inserted_at < self.ttl_secs);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache: TtlCache<String, bool> = TtlCache::new(300);
        cache.insert("wallet".into(), true, 1_000).await;

        assert_eq!(cache.get(&"wallet".into(), 1_000).await, Some(true));
        assert_eq!(cache.get(&"wallet".into(), 1_299).await, Some(true));
        assert_eq!(cache.get(&"wallet".into(), 1_300).await, None);
    }

    #[tokio::test]
    async fn reinsert_refreshes_the_clock() {
        let cache: TtlCache<String, bool> = TtlCache::new(300);
        cache.insert("wallet".into(), true, 1_000).await;
        cache.insert("wallet".into(), false, 1_250).await;

        // The newer insertion wins and restarts the TTL.
        assert_eq!(cache.get(&"wallet".into(), 1_400).await, Some(false));
        assert_eq!(cache.get(&"wallet".into(), 1_550).await, None);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_entries() {
        let cache: TtlCache<&str, u32> = TtlCache::new(100);
        cache.insert("old", 1, 0).await;
        cache.insert("fresh", 2, 90).await;

        cache.purge_expired(120).await;
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(&"fresh", 120).await, Some(2));
    }
}
