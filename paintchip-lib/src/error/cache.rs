//! Cache error types

/// Errors that can occur while reading or writing the color cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backing database failed.
    #[error("Cache database error: {0}")]
    Database(#[from] async_sqlite::Error),

    /// A stored value is neither a color record nor the invalid-code marker.
    #[error("Corrupt cache entry '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A color record could not be serialized for storage.
    #[error("Cache serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}
