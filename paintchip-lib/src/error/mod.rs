//! Error types

mod api;
mod cache;
mod field;
mod lookup;

pub use api::*;
pub use cache::*;
pub use field::*;
pub use lookup::*;

/// Top-level error for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog request failed in a way that is not collapsed into "not found".
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading or writing the color cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A catalog record has an unparseable numeric field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The bulk lookup table could not be loaded.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A local JSON file could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
