//! Bulk lookup table error types

/// Errors that can occur while loading the bulk lookup table.
///
/// Unlike single-color fetches, none of these are collapsed into "not found":
/// a caller waiting on metadata must see them.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The lookup file was served with a non-success status.
    #[error("Failed to fetch color lookup data: HTTP {status}")]
    Http { status: u16 },

    /// Network error while fetching the lookup file.
    #[error("Network error fetching color lookup data: {0}")]
    Network(#[from] reqwest::Error),

    /// The lookup file is not a JSON array of color metadata.
    #[error("Color lookup data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The lookup file could not be read from disk.
    #[error("Failed to read color lookup file: {0}")]
    Io(#[from] std::io::Error),
}
