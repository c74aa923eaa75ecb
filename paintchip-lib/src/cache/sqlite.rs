//! SQLite-backed persistent cache implementation.

use std::path::Path;

use async_sqlite::rusqlite;
use async_sqlite::rusqlite::OptionalExtension;
use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_trait::async_trait;
use chrono::DateTime;

use super::CacheProvider;
use super::CachedValue;
use crate::error::CacheError;

/// A persistent cache backed by SQLite.
///
/// Data is stored in a SQLite database file and persists across process restarts.
/// Uses WAL journal mode for better concurrent read performance.
///
/// # Example
///
/// ```ignore
/// use paintchip_lib::cache::SqliteCache;
///
/// // File-based cache
/// let cache = SqliteCache::open("cache.db").await?;
///
/// // In-memory cache (for testing)
/// let cache = SqliteCache::open_in_memory().await?;
/// ```
pub struct SqliteCache {
    client: Client,
}

impl SqliteCache {
    /// Opens a SQLite cache at the specified path.
    ///
    /// Creates the database file and cache table if they don't exist. The
    /// parent directory must already exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory SQLite cache.
    ///
    /// Useful for testing. Data is lost when the cache is dropped.
    pub async fn open_in_memory() -> Result<Self, CacheError> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), CacheError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS cache (
                        key TEXT PRIMARY KEY,
                        data BLOB NOT NULL,
                        created_at INTEGER NOT NULL
                    )",
                    [],
                )
            })
            .await?;
        Ok(())
    }

    /// Returns the number of entries in the cache.
    pub async fn len(&self) -> Result<usize, CacheError> {
        let count = self
            .client
            .conn(|conn| conn.query_row("SELECT COUNT(*) FROM cache", [], |row| row.get::<_, i64>(0)))
            .await?;
        Ok(count as usize)
    }

    /// Returns `true` if the cache is empty.
    pub async fn is_empty(&self) -> Result<bool, CacheError> {
        self.len().await.map(|len| len == 0)
    }
}

#[async_trait]
impl CacheProvider for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<CachedValue>, CacheError> {
        let key = key.to_string();

        let row = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT data, created_at FROM cache WHERE key = ?",
                    [key],
                    |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
            })
            .await?;

        Ok(row.map(|(data, created_at)| {
            let created_at = DateTime::from_timestamp(created_at, 0).unwrap_or(DateTime::UNIX_EPOCH);
            CachedValue::new(data, created_at)
        }))
    }

    async fn set(&self, key: &str, value: CachedValue) -> Result<(), CacheError> {
        let key = key.to_string();
        let data = value.data;
        let created_at = value.created_at.timestamp();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO cache (key, data, created_at) VALUES (?, ?, ?)",
                    rusqlite::params![key, data, created_at],
                )
            })
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let key = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM cache WHERE key = ?", [key]))
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.client
            .conn(|conn| conn.execute("DELETE FROM cache", []))
            .await?;
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        let prefix = prefix.to_string();

        // substr instead of LIKE: `_` in a prefix must match literally.
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key FROM cache WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
                )?;
                let keys = stmt
                    .query_map([&prefix], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>();
                keys
            })
            .await?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_in_memory() {
        let cache = SqliteCache::open_in_memory().await.unwrap();
        assert!(cache.is_empty().await.unwrap());

        cache.set("k", CachedValue::new_now(b"v1".to_vec())).await.unwrap();
        cache.set("k", CachedValue::new_now(b"v2".to_vec())).await.unwrap();

        let value = cache.get("k").await.unwrap().unwrap();
        assert_eq!(value.data, b"v2");
        assert_eq!(cache.len().await.unwrap(), 1);

        cache.remove("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");

        {
            let cache = SqliteCache::open(&path).await.unwrap();
            cache.set("scs:color:SW7008", CachedValue::new_now(b"x".to_vec())).await.unwrap();
        }

        let cache = SqliteCache::open(&path).await.unwrap();
        let value = cache.get("scs:color:SW7008").await.unwrap().unwrap();
        assert_eq!(value.data, b"x");
    }

    #[tokio::test]
    async fn test_prefix_is_literal() {
        let cache = SqliteCache::open_in_memory().await.unwrap();
        for key in ["a_b:1", "axb:2", "a_b:3"] {
            cache.set(key, CachedValue::new_now(Vec::new())).await.unwrap();
        }

        assert_eq!(cache.keys_with_prefix("a_b:").await.unwrap(), vec!["a_b:1", "a_b:3"]);

        cache.clear().await.unwrap();
        assert!(cache.is_empty().await.unwrap());
    }
}
