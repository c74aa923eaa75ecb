//! Catalog API error types

/// Errors that can occur during catalog requests.
///
/// A non-success status is not an error: the catalog uses it to say a code
/// does not exist, and [`CatalogClient::fetch_color`](crate::CatalogClient::fetch_color)
/// reports that as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns `true` if the request never produced a response (connection
    /// refused, DNS failure, timeout, broken body stream).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
