//! Catalog HTTP client

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::CacheLookup;
use crate::cache::CacheProvider;
use crate::cache::ColorCache;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::RawCatalogColor;

/// Base URL of the public shared color service.
pub const DEFAULT_BASE_URL: &str = "https://api.sherwin-williams.com/shared-color-service";

/// Client for the remote color catalog.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use paintchip_lib::CatalogClient;
/// use paintchip_lib::cache::SqliteCache;
///
/// let client = CatalogClient::builder()
///     .cache(SqliteCache::open("cache.db").await?)
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// if let Some(color) = client.get_color("SW7008").await? {
///     println!("{} is #{}", color.name, color.hex);
/// }
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
    cache: Option<ColorCache>,
}

impl CatalogClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the catalog base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the color cache, if one is configured.
    pub fn cache(&self) -> Option<&ColorCache> {
        self.inner.cache.as_ref()
    }

    /// Returns the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.inner.http_client
    }

    /// Returns the request URL for a color code.
    ///
    /// The code keeps its original casing; only the cache key is uppercased.
    pub fn color_url(&self, code: &str) -> String {
        format!(
            "{}/color/byColorNumber/{}",
            self.inner.base_url.trim_end_matches('/'),
            urlencoding::encode(code)
        )
    }

    /// Fetches a color from the catalog, bypassing the cache.
    ///
    /// - `Ok(Some(color))`: the catalog returned the record.
    /// - `Ok(None)`: the catalog answered with a non-success status, meaning the
    ///   code does not exist.
    /// - `Err(ApiError::Network)`: no response was received.
    /// - `Err(ApiError::Parse)`: a success response did not match the record schema.
    pub async fn fetch_color(&self, code: &str) -> Result<Option<RawCatalogColor>, ApiError> {
        let url = self.color_url(code);
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(&url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!("Catalog answered {} for {}", status.as_u16(), code);
            return Ok(None);
        }

        let body = response.text().await?;
        match serde_json::from_str::<RawCatalogColor>(&body) {
            Ok(color) => Ok(Some(color)),
            Err(e) => Err(ApiError::parse_with_body(
                format!("Failed to parse catalog color {}: {}", code, e),
                body,
            )),
        }
    }

    /// Fetches a color from the catalog, treating transport failures as "not found".
    ///
    /// This is [`fetch_color`](Self::fetch_color) with network errors collapsed
    /// into `Ok(None)`. Schema violations are still returned as errors.
    pub async fn download_color_info(&self, code: &str) -> Result<Option<RawCatalogColor>, ApiError> {
        match self.fetch_color(code).await {
            Err(e) if e.is_transport() => {
                log::warn!("Treating {} as not found: {}", code, e);
                Ok(None)
            }
            other => other,
        }
    }

    /// Looks up a color, consulting the cache before the network.
    ///
    /// A cached record is returned as-is and a cached invalid-code marker
    /// returns `None`; neither touches the network. On a cache miss the color
    /// is fetched and the outcome is cached: the record when found, the
    /// invalid-code marker when the catalog rejects the code. Transport failures
    /// return `None` without caching anything, so a later call retries.
    ///
    /// Without a configured cache every call goes to the network.
    pub async fn get_color(&self, code: &str) -> Result<Option<RawCatalogColor>, Error> {
        let Some(cache) = &self.inner.cache else {
            return Ok(self.download_color_info(code).await?);
        };

        match cache.read(code).await? {
            CacheLookup::Hit(color) => {
                log::debug!("Cache hit for {}", code);
                return Ok(Some(color));
            }
            CacheLookup::InvalidCode => {
                log::debug!("Cached invalid code {}", code);
                return Ok(None);
            }
            CacheLookup::Miss => log::debug!("Cache miss for {}", code),
        }

        match self.fetch_color(code).await {
            Ok(Some(color)) => {
                cache.store_color(code, &color).await?;
                Ok(Some(color))
            }
            Ok(None) => {
                cache.store_invalid(code).await?;
                Ok(None)
            }
            Err(e) if e.is_transport() => {
                log::warn!("Treating {} as not found: {}", code, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Drops any cached entry for `code` and looks it up again.
    pub async fn refetch_color(&self, code: &str) -> Result<Option<RawCatalogColor>, Error> {
        if let Some(cache) = &self.inner.cache {
            cache.forget(code).await?;
        }
        self.get_color(code).await
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("cached", &self.inner.cache.is_some())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing a [`CatalogClient`].
///
/// Every setting is optional; the default client talks to
/// [`DEFAULT_BASE_URL`] without a cache or timeout.
///
/// # Example
///
/// ```ignore
/// let client = CatalogClient::builder()
///     .base_url("http://localhost:8080")
///     .cache(InMemoryCache::new())
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct CatalogClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<ColorCache>,
}

impl CatalogClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: None,
        }
    }

    /// Sets the catalog base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Caches lookups in the given provider.
    pub fn cache(mut self, provider: impl CacheProvider + 'static) -> Self {
        self.cache = Some(ColorCache::from_provider(provider));
        self
    }

    /// Caches lookups in an existing (possibly shared) color cache.
    pub fn color_cache(mut self, cache: ColorCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the [`CatalogClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL is not an absolute
    /// http(s) URL, or [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<CatalogClient, ApiError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.base_url,
                parsed.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                base_url: self.base_url,
                http_client,
                timeout: self.timeout,
                cache: self.cache,
            }),
        })
    }
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
