//! In-memory cache implementation using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::CacheProvider;
use super::CachedValue;
use crate::error::CacheError;

/// An in-memory cache backed by a concurrent hash map.
///
/// Fast and thread-safe, but data is lost when the process exits. Use
/// [`SqliteCache`](super::SqliteCache) for a cache that survives restarts.
///
/// # Example
///
/// ```
/// use paintchip_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, CachedValue>,
}

impl InMemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CachedValue>, CacheError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: CachedValue) -> Result<(), CacheError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.store.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.store.clear();
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
