//! In-process TTL cache.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use vitrina_core::{Cache, CacheError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A `HashMap` behind a `RwLock`, with expiry checked on every read.
///
/// Expiry uses `tokio::time::Instant`, so tests running with a paused clock
/// can move past the TTL with `tokio::time::advance`.
///
/// Expired entries stay in the map until overwritten or until
/// [`purge_expired`](Self::purge_expired) runs; `get` never returns them.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes one key. Not part of the [`Cache`] contract; services never
    /// invalidate, this exists for diagnostics and tests.
    pub async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drops every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of stored entries, live or expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_value_visible_within_ttl() {
        let cache = MemoryCache::new();
        cache.set("about", "{}".into(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("about").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new();
        cache.set("about", "{}".into(), TTL).await.unwrap();

        tokio::time::advance(TTL).await;
        assert_eq!(cache.get("about").await.unwrap(), None);
        // Still stored until purged
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.purge_expired().await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_refreshes_expiry() {
        let cache = MemoryCache::new();
        cache.set("images", "old".into(), TTL).await.unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;
        cache.set("images", "new".into(), TTL).await.unwrap();
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(cache.get("images").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = MemoryCache::new();
        cache.set("products", "[]".into(), TTL).await.unwrap();
        assert!(cache.remove("products").await);
        assert!(!cache.remove("products").await);
        assert_eq!(cache.get("products").await.unwrap(), None);
    }
}
