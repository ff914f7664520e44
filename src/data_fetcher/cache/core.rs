use super::types::{CacheEntry, CacheStats};
use crate::constants::cache_ttl;
use lru::LruCache;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Process-local key/value cache with per-entry TTL and lazy expiry.
///
/// There is no capacity bound; entries leave the cache only when a read
/// finds them expired or on [`TtlCache::clear`]. The cache is constructed
/// explicitly and shared through an `Arc` by whoever needs it.
#[derive(Debug)]
pub struct TtlCache<V, K = String>
where
    K: Hash + Eq,
{
    name: &'static str,
    entries: RwLock<LruCache<K, CacheEntry<V>>>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl<V: Clone> TtlCache<V, String> {
    /// Creates a cache whose `set` uses the 5 minute default TTL
    pub fn new(name: &'static str) -> Self {
        Self::with_default_ttl(name, Duration::from_secs(cache_ttl::DEFAULT_SECONDS))
    }
}

impl<V: Clone, K: Hash + Eq + Clone + std::fmt::Debug> TtlCache<V, K> {
    pub fn with_default_ttl(name: &'static str, default_ttl: Duration) -> Self {
        Self {
            name,
            entries: RwLock::new(LruCache::unbounded()),
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    /// Returns a clone of the value if present and not expired.
    /// Expired entries are removed.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!(
                    "Cache hit: cache={}, key={:?}, age={:?}",
                    self.name,
                    key,
                    entry.cached_at.elapsed()
                );
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.data.clone())
            }
            Some(entry) => {
                warn!(
                    "Removing expired cache entry: cache={}, key={:?}, age={:?}, ttl={:?}",
                    self.name,
                    key,
                    entry.cached_at.elapsed(),
                    entry.ttl
                );
                entries.pop(key);
                self.expired.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                debug!("Cache miss: cache={}, key={:?}", self.name, key);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores a value with the default TTL
    pub async fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Stores a value with an explicit TTL
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        debug!(
            "Caching entry: cache={}, key={:?}, ttl={:?}",
            self.name, key, ttl
        );
        self.entries
            .write()
            .await
            .put(key, CacheEntry::new(value, ttl));
    }

    /// Removes a single entry
    pub async fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().await.pop(key).map(|entry| entry.data)
    }

    /// Clears all entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, including ones that have expired but not been read yet
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache: TtlCache<String> = TtlCache::new("test");
        cache.set("key".to_string(), "value".to_string()).await;

        assert_eq!(cache.get(&"key".to_string()).await, Some("value".to_string()));
        assert_eq!(cache.get(&"other".to_string()).await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_one_millisecond_ttl_expires() {
        let cache: TtlCache<u32> = TtlCache::new("test");
        cache
            .set_with_ttl("key".to_string(), 42, Duration::from_millis(1))
            .await;

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(cache.get(&"key".to_string()).await, None);
        // Lazily evicted on read
        assert_eq!(cache.len().await, 0);
        assert_eq!(cache.stats().await.expired, 1);
    }

    #[tokio::test]
    async fn test_overwrite_resets_ttl() {
        let cache: TtlCache<u32> = TtlCache::new("test");
        cache
            .set_with_ttl("key".to_string(), 1, Duration::from_millis(1))
            .await;
        cache
            .set_with_ttl("key".to_string(), 2, Duration::from_secs(60))
            .await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get(&"key".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn test_no_capacity_bound() {
        let cache: TtlCache<usize> = TtlCache::new("test");
        for i in 0..1000 {
            cache.set(format!("key-{i}"), i).await;
        }
        assert_eq!(cache.len().await, 1000);
        assert_eq!(cache.get(&"key-0".to_string()).await, Some(0));
    }

    #[tokio::test]
    async fn test_clear_and_remove() {
        let cache: TtlCache<u32> = TtlCache::new("test");
        cache.set("a".to_string(), 1).await;
        cache.set("b".to_string(), 2).await;

        assert_eq!(cache.remove(&"a".to_string()).await, Some(1));
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_shared_between_tasks() {
        let cache: Arc<TtlCache<u32>> = Arc::new(TtlCache::new("shared"));

        let handles: Vec<_> = (0..10u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.set(format!("key-{i}"), i).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 10);
        assert_eq!(cache.get(&"key-7".to_string()).await, Some(7));
    }
}
