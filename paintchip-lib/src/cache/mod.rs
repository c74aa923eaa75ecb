//! Generic caching layer
//!
//! Provides a `CacheProvider` trait and implementations for storing
//! serialized values by string key. Entries never expire; they are replaced
//! only by an explicit write. [`ColorCache`] builds the catalog color cache
//! on top of any provider.

mod color;
mod memory;
mod sqlite;

pub use color::*;
pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::CacheError;

/// A cached value with the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue {
    /// The cached data, serialized as bytes.
    pub data: Vec<u8>,
    /// When this value was cached.
    pub created_at: DateTime<Utc>,
}

impl CachedValue {
    /// Creates a new cached value.
    pub fn new(data: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        Self { data, created_at }
    }

    /// Creates a new cached value with the current time as `created_at`.
    pub fn new_now(data: Vec<u8>) -> Self {
        Self {
            data,
            created_at: Utc::now(),
        }
    }
}

/// Trait for cache providers.
///
/// Implementations store and retrieve cached values by string keys.
/// Writes are last-write-wins; there is no expiry.
///
/// # Example
///
/// ```ignore
/// use paintchip_lib::cache::{CacheProvider, InMemoryCache, CachedValue};
///
/// let cache = InMemoryCache::new();
///
/// cache.set("my-key", CachedValue::new_now(b"hello".to_vec())).await?;
///
/// if let Some(cached) = cache.get("my-key").await? {
///     println!("Got: {:?}", cached.data);
/// }
/// ```
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Retrieves a cached value by key.
    async fn get(&self, key: &str) -> Result<Option<CachedValue>, CacheError>;

    /// Stores a value in the cache, replacing any previous value.
    async fn set(&self, key: &str, value: CachedValue) -> Result<(), CacheError>;

    /// Removes a value from the cache.
    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Clears all values from the cache.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Returns every key starting with `prefix`.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError>;
}
