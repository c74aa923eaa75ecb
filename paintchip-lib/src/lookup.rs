//! Bulk color lookup table
//!
//! The lookup table is a precomputed JSON array of [`ColorMetadata`], built
//! offline from downloaded catalog records (see [`build_lookup`]). It is
//! loaded at most once per [`LookupTable`] and never changes afterwards.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::error::Error;
use crate::error::FieldError;
use crate::error::LookupError;
use crate::metadata::calculate_metadata;
use crate::model::ColorMetadata;
use crate::model::RawCatalogColor;

/// Where the lookup table is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupSource {
    /// A static JSON file served over HTTP.
    Url(String),
    /// A JSON file on the local filesystem.
    File(PathBuf),
    /// No table; every lookup falls through to the catalog.
    Empty,
}

/// The bulk lookup table, loaded lazily on first use.
///
/// Concurrent first callers share a single load. A failed load is not
/// remembered, so the next caller tries again.
///
/// # Example
///
/// ```ignore
/// use paintchip_lib::lookup::{LookupSource, LookupTable};
///
/// let table = LookupTable::new(LookupSource::File("colorLookup.json".into()));
/// if let Some(metadata) = table.find("SW7008").await? {
///     println!("{:?}", metadata.lch);
/// }
/// ```
pub struct LookupTable {
    source: LookupSource,
    http_client: reqwest::Client,
    loaded: OnceCell<LoadedTable>,
}

struct LoadedTable {
    colors: Vec<ColorMetadata>,
    index: HashMap<String, usize>,
}

impl LoadedTable {
    fn new(colors: Vec<ColorMetadata>) -> Self {
        let mut index = HashMap::with_capacity(colors.len());
        for (i, color) in colors.iter().enumerate() {
            // First occurrence wins, like a linear scan would.
            index.entry(color.number.clone()).or_insert(i);
        }
        Self { colors, index }
    }
}

impl LookupTable {
    /// Creates a table that loads from `source` on first use.
    pub fn new(source: LookupSource) -> Self {
        Self::with_http_client(source, reqwest::Client::new())
    }

    /// Creates a table that fetches [`LookupSource::Url`] with the given client.
    pub fn with_http_client(source: LookupSource, http_client: reqwest::Client) -> Self {
        Self {
            source,
            http_client,
            loaded: OnceCell::new(),
        }
    }

    /// Creates an already-loaded table.
    pub fn preloaded(colors: Vec<ColorMetadata>) -> Self {
        Self {
            source: LookupSource::Empty,
            http_client: reqwest::Client::new(),
            loaded: OnceCell::from(LoadedTable::new(colors)),
        }
    }

    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::preloaded(Vec::new())
    }

    /// Returns where this table loads from.
    pub fn source(&self) -> &LookupSource {
        &self.source
    }

    /// Returns `true` once the table has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Returns every color in the table, in file order.
    pub async fn colors(&self) -> Result<&[ColorMetadata], LookupError> {
        Ok(&self.load().await?.colors)
    }

    /// Finds a color by exact code.
    pub async fn find(&self, code: &str) -> Result<Option<&ColorMetadata>, LookupError> {
        let table = self.load().await?;
        Ok(table.index.get(code).map(|&i| &table.colors[i]))
    }

    async fn load(&self) -> Result<&LoadedTable, LookupError> {
        self.loaded.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<LoadedTable, LookupError> {
        let colors: Vec<ColorMetadata> = match &self.source {
            LookupSource::Url(url) => {
                log::info!("Loading color lookup table from {}", url);
                let response = self.http_client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LookupError::Http {
                        status: status.as_u16(),
                    });
                }
                let body = response.bytes().await?;
                serde_json::from_slice(&body)?
            }
            LookupSource::File(path) => {
                log::info!("Loading color lookup table from {}", path.display());
                let bytes = tokio::fs::read(path).await?;
                serde_json::from_slice(&bytes)?
            }
            LookupSource::Empty => Vec::new(),
        };

        log::info!("Loaded {} colors into the lookup table", colors.len());
        Ok(LoadedTable::new(colors))
    }
}

impl std::fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupTable")
            .field("source", &self.source)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Computes metadata for every downloaded record, preserving order.
///
/// # Errors
///
/// Returns the first [`FieldError`] encountered.
pub fn build_lookup(colors: &[RawCatalogColor]) -> Result<Vec<ColorMetadata>, FieldError> {
    colors.iter().map(calculate_metadata).collect()
}

/// Writes a lookup table as a compact JSON array.
pub async fn write_lookup(path: impl AsRef<Path>, colors: &[ColorMetadata]) -> Result<(), Error> {
    let json = serde_json::to_vec(colors)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, r: &str) -> RawCatalogColor {
        serde_json::from_value(serde_json::json!({
            "colorNumber": code,
            "name": format!("Color {}", code),
            "hex": "#000000",
            "red": r, "green": "0", "blue": "0",
            "hue": "0", "saturation": "1", "lightness": "0.5",
            "lrv": "10"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_preloaded_find() {
        let table = LookupTable::preloaded(build_lookup(&[raw("SW1", "10"), raw("SW2", "20")]).unwrap());
        assert!(table.is_loaded());

        assert_eq!(table.find("SW2").await.unwrap().unwrap().rgb.r, 20);
        assert!(table.find("sw2").await.unwrap().is_none());
        assert_eq!(table.colors().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_first_duplicate_wins() {
        let table = LookupTable::preloaded(build_lookup(&[raw("SW1", "10"), raw("SW1", "99")]).unwrap());
        assert_eq!(table.find("SW1").await.unwrap().unwrap().rgb.r, 10);
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colorLookup.json");
        let colors = build_lookup(&[raw("SW1", "10")]).unwrap();
        write_lookup(&path, &colors).await.unwrap();

        let table = LookupTable::new(LookupSource::File(path.clone()));
        assert_eq!(table.source(), &LookupSource::File(path));
        assert!(!table.is_loaded());
        assert_eq!(table.colors().await.unwrap(), colors.as_slice());
        assert!(table.is_loaded());
    }

    #[tokio::test]
    async fn test_loaded_table_matches_live_calculation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colorLookup.json");
        let colors: Vec<RawCatalogColor> = (0..=40u8)
            .map(|r| raw(&format!("SW{}", r), &(r * 6).to_string()))
            .collect();
        write_lookup(&path, &build_lookup(&colors).unwrap()).await.unwrap();

        let table = LookupTable::new(LookupSource::File(path));
        for color in &colors {
            let loaded = table.find(&color.color_number).await.unwrap().unwrap();
            assert_eq!(*loaded, calculate_metadata(color).unwrap());
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error_and_not_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colorLookup.json");
        let table = LookupTable::new(LookupSource::File(path.clone()));

        assert!(matches!(table.find("SW1").await, Err(LookupError::Io(_))));
        assert!(!table.is_loaded());

        write_lookup(&path, &build_lookup(&[raw("SW1", "10")]).unwrap()).await.unwrap();
        assert!(table.find("SW1").await.unwrap().is_some());
    }

    #[test]
    fn test_build_lookup_reports_bad_field() {
        let err = build_lookup(&[raw("SW1", "10"), raw("SW2", "red")]).unwrap_err();
        assert_eq!(err.field(), "red");
    }
}
