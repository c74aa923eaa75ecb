//! Catalog color cache
//!
//! Stores catalog lookups under `scs:color:{CODE}` with the code uppercased.
//! A value is either a JSON-serialized [`RawCatalogColor`] or the literal
//! marker `invalid-code`, recorded when the catalog reported the code as
//! nonexistent.

use std::sync::Arc;

use super::CacheProvider;
use super::CachedValue;
use crate::error::CacheError;
use crate::model::RawCatalogColor;

/// Key prefix for single-color entries.
pub const COLOR_KEY_PREFIX: &str = "scs:color:";

/// Stored value marking a code the catalog does not know.
pub const INVALID_CODE_MARKER: &[u8] = b"invalid-code";

/// Key of the user tag definitions. Owned by the UI layer.
pub const TAG_DEFINITIONS_KEY: &str = "ct:tags";

/// Key of the color-to-tag assignments. Owned by the UI layer.
pub const TAG_ASSIGNMENTS_KEY: &str = "ct:joins";

/// Returns the cache key for a color code.
///
/// # Example
///
/// ```
/// use paintchip_lib::cache::color_cache_key;
///
/// assert_eq!(color_cache_key("sw7008"), "scs:color:SW7008");
/// ```
pub fn color_cache_key(code: &str) -> String {
    format!("{}{}", COLOR_KEY_PREFIX, code.to_uppercase())
}

/// Result of reading a code from the [`ColorCache`].
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// The record was cached by an earlier successful fetch.
    Hit(RawCatalogColor),
    /// An earlier fetch found the code does not exist.
    InvalidCode,
    /// Nothing is known about the code.
    Miss,
}

/// The catalog color cache, layered over any [`CacheProvider`].
///
/// Cheap to clone; clones share the provider.
#[derive(Clone)]
pub struct ColorCache {
    provider: Arc<dyn CacheProvider>,
}

impl ColorCache {
    /// Creates a color cache over a shared provider.
    pub fn new(provider: Arc<dyn CacheProvider>) -> Self {
        Self { provider }
    }

    /// Creates a color cache that owns its provider.
    pub fn from_provider(provider: impl CacheProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Reads a code from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Corrupt`] if the stored value is neither the
    /// invalid-code marker nor a valid color record.
    pub async fn read(&self, code: &str) -> Result<CacheLookup, CacheError> {
        let key = color_cache_key(code);

        let Some(cached) = self.provider.get(&key).await? else {
            return Ok(CacheLookup::Miss);
        };

        if cached.data == INVALID_CODE_MARKER {
            return Ok(CacheLookup::InvalidCode);
        }

        serde_json::from_slice(&cached.data)
            .map(CacheLookup::Hit)
            .map_err(|source| CacheError::Corrupt { key, source })
    }

    /// Stores a successfully fetched record under `code`.
    pub async fn store_color(&self, code: &str, color: &RawCatalogColor) -> Result<(), CacheError> {
        let data = serde_json::to_vec(color).map_err(CacheError::Serialize)?;
        self.provider
            .set(&color_cache_key(code), CachedValue::new_now(data))
            .await
    }

    /// Marks `code` as nonexistent.
    pub async fn store_invalid(&self, code: &str) -> Result<(), CacheError> {
        self.provider
            .set(
                &color_cache_key(code),
                CachedValue::new_now(INVALID_CODE_MARKER.to_vec()),
            )
            .await
    }

    /// Drops whatever is cached for `code`, so the next read is a miss.
    pub async fn forget(&self, code: &str) -> Result<(), CacheError> {
        self.provider.remove(&color_cache_key(code)).await
    }

    /// Returns the (uppercased) codes with a cache entry, sorted.
    pub async fn cached_codes(&self) -> Result<Vec<String>, CacheError> {
        let mut codes: Vec<String> = self
            .provider
            .keys_with_prefix(COLOR_KEY_PREFIX)
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(COLOR_KEY_PREFIX).map(str::to_string))
            .collect();
        codes.sort();
        Ok(codes)
    }
}

impl std::fmt::Debug for ColorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorCache").finish_non_exhaustive()
    }
}
