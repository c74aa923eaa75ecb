//! CLI command implementations

pub mod cache;
pub mod download;
pub mod lookup;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use paintchip_lib::CatalogClient;
use paintchip_lib::cache::SqliteCache;
use paintchip_lib::lookup::LookupSource;
use paintchip_lib::lookup::LookupTable;

use crate::GlobalArgs;
use crate::paths;

/// Opens the lookup cache database, creating its directory if needed.
pub async fn open_cache(global: &GlobalArgs) -> Result<SqliteCache> {
    let path = paths::resolve(global.cache_db.clone(), paths::cache_db, "cache database")?;
    ensure_parent(&path)?;
    SqliteCache::open(&path)
        .await
        .with_context(|| format!("Failed to open cache database {}", path.display()))
}

/// Builds a catalog client, backed by the lookup cache when `cached` is set.
pub async fn catalog_client(global: &GlobalArgs, cached: bool) -> Result<CatalogClient> {
    let mut builder = CatalogClient::builder()
        .base_url(&global.base_url)
        .timeout(Duration::from_secs(global.timeout));
    if cached {
        builder = builder.cache(open_cache(global).await?);
    }
    let client = builder.build().context("Invalid catalog configuration")?;
    log::debug!("Catalog base URL: {}", client.base_url());
    Ok(client)
}

/// Chooses the lookup table source.
///
/// An explicit value is a URL if it has an http(s) scheme and a file path
/// otherwise. Without one, the table in the data dir is used if it has been
/// built, and no table at all if it has not.
pub fn lookup_table(table: Option<String>, client: &CatalogClient) -> LookupTable {
    let source = match table {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => LookupSource::Url(url),
        Some(path) => LookupSource::File(path.into()),
        None => match paths::lookup_file() {
            Some(path) if path.exists() => LookupSource::File(path),
            _ => LookupSource::Empty,
        },
    };
    let table = LookupTable::with_http_client(source, client.http_client().clone());
    log::debug!("Lookup table source: {:?}", table.source());
    table
}

/// Creates the parent directory of `path`.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}
