//! Offline range downloader
//!
//! Walks a numeric range of color codes against the catalog, one request at
//! a time, and classifies each code into an archive of known colors or known
//! invalid codes. The archive is persisted as two JSON side files so a later
//! run only requests codes that are still unclassified.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::model::RawCatalogColor;
use crate::CatalogClient;

/// Default file name of the downloaded colors archive.
pub const COLORS_FILE: &str = "swColors.json";

/// Default file name of the invalid codes archive.
pub const INVALID_CODES_FILE: &str = "invalidSwCodes.json";

/// Progress is reported whenever the current code is a multiple of this.
pub const PROGRESS_INTERVAL: u32 = 100;

/// Formats a numeric code as a catalog color code.
///
/// # Example
///
/// ```
/// use paintchip_lib::download::sw_code;
///
/// assert_eq!(sw_code(7), "SW0007");
/// assert_eq!(sw_code(7008), "SW7008");
/// ```
pub fn sw_code(code: u32) -> String {
    format!("SW{:04}", code)
}

// =============================================================================
// Archive
// =============================================================================

/// Colors and invalid codes classified so far.
///
/// Both lists are append-only. Colors are deduplicated by color number and
/// invalid codes by value.
#[derive(Debug, Clone, Default)]
pub struct ColorArchive {
    colors: Vec<RawCatalogColor>,
    invalid_codes: Vec<u32>,
    known_numbers: HashSet<String>,
    known_invalid: HashSet<u32>,
}

impl ColorArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an archive from existing lists, dropping duplicates.
    pub fn from_parts(colors: Vec<RawCatalogColor>, invalid_codes: Vec<u32>) -> Self {
        let mut archive = Self::new();
        for color in colors {
            archive.record_color(color);
        }
        for code in invalid_codes {
            archive.record_invalid(code);
        }
        archive
    }

    /// Loads an archive from its two side files.
    ///
    /// A missing file starts that list empty.
    ///
    /// # Errors
    ///
    /// Any other read failure, or a file that is not the expected JSON array,
    /// is an error, so a later [`save`](Self::save) never overwrites data it
    /// could not read.
    pub async fn load(colors_path: impl AsRef<Path>, invalid_path: impl AsRef<Path>) -> Result<Self, Error> {
        let colors = read_or_init(colors_path.as_ref()).await?;
        let invalid_codes = read_or_init(invalid_path.as_ref()).await?;
        Ok(Self::from_parts(colors, invalid_codes))
    }

    /// Writes both side files as pretty-printed JSON.
    pub async fn save(&self, colors_path: impl AsRef<Path>, invalid_path: impl AsRef<Path>) -> Result<(), Error> {
        tokio::fs::write(colors_path, serde_json::to_vec_pretty(&self.colors)?).await?;
        tokio::fs::write(invalid_path, serde_json::to_vec_pretty(&self.invalid_codes)?).await?;
        Ok(())
    }

    /// Downloaded colors, in download order.
    pub fn colors(&self) -> &[RawCatalogColor] {
        &self.colors
    }

    /// Codes the catalog reported as nonexistent, in download order.
    pub fn invalid_codes(&self) -> &[u32] {
        &self.invalid_codes
    }

    /// Returns `true` if `code` is already classified either way.
    pub fn contains(&self, code: u32) -> bool {
        self.known_invalid.contains(&code) || self.known_numbers.contains(&sw_code(code))
    }

    /// Appends a color unless one with the same color number is present.
    ///
    /// Returns `true` if the color was added.
    pub fn record_color(&mut self, color: RawCatalogColor) -> bool {
        if !self.known_numbers.insert(color.color_number.clone()) {
            return false;
        }
        self.colors.push(color);
        true
    }

    /// Appends an invalid code unless already present.
    ///
    /// Returns `true` if the code was added.
    pub fn record_invalid(&mut self, code: u32) -> bool {
        if !self.known_invalid.insert(code) {
            return false;
        }
        self.invalid_codes.push(code);
        true
    }
}

async fn read_or_init<T: DeserializeOwned + Default>(path: &Path) -> Result<T, Error> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Downloader
// =============================================================================

/// Counts from one [`RangeDownloader::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Codes newly found in the catalog.
    pub downloaded: u32,
    /// Codes newly classified as invalid.
    pub invalid: u32,
    /// Codes skipped because they were already classified, or whose record
    /// duplicated an archived color number.
    pub skipped: u32,
    /// Codes left unclassified because the request failed.
    pub failed: u32,
}

/// Downloads ranges of color codes into a [`ColorArchive`].
#[derive(Debug, Clone)]
pub struct RangeDownloader {
    client: CatalogClient,
}

impl RangeDownloader {
    /// Creates a downloader over a catalog client.
    ///
    /// Requests bypass the client's cache; the archive is the record of what
    /// has been classified.
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Walks `min..=max` sequentially, classifying every code not yet in `archive`.
    ///
    /// `progress` is called with the current code and the archive so far
    /// whenever the code is a multiple of [`PROGRESS_INTERVAL`]. Transport failures and malformed responses leave
    /// the code unclassified so a rerun retries it.
    pub async fn run(
        &self,
        min: u32,
        max: u32,
        archive: &mut ColorArchive,
        mut progress: impl FnMut(u32, &ColorArchive),
    ) -> DownloadSummary {
        let mut summary = DownloadSummary::default();

        for code in min..=max {
            if code % PROGRESS_INTERVAL == 0 {
                log::debug!("Downloaded up to {}", code);
                progress(code, &*archive);
            }

            if archive.contains(code) {
                summary.skipped += 1;
                continue;
            }

            let color_code = sw_code(code);
            match self.client.fetch_color(&color_code).await {
                Ok(Some(color)) => {
                    let number = color.color_number.clone();
                    if archive.record_color(color) {
                        summary.downloaded += 1;
                    } else {
                        log::debug!("{} answered with already archived {}", color_code, number);
                        summary.skipped += 1;
                    }
                }
                Ok(None) => {
                    archive.record_invalid(code);
                    summary.invalid += 1;
                }
                Err(e) => {
                    log::warn!("Leaving {} unclassified: {}", color_code, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str) -> RawCatalogColor {
        serde_json::from_value(serde_json::json!({
            "colorNumber": code,
            "name": "Test",
            "hex": "#FFFFFF",
            "red": "255", "green": "255", "blue": "255",
            "hue": "0", "saturation": "0", "lightness": "1",
            "lrv": "93"
        }))
        .unwrap()
    }

    #[test]
    fn test_sw_code_padding() {
        assert_eq!(sw_code(0), "SW0000");
        assert_eq!(sw_code(42), "SW0042");
        assert_eq!(sw_code(12345), "SW12345");
    }

    #[test]
    fn test_archive_dedup() {
        let mut archive = ColorArchive::from_parts(vec![raw("SW0001"), raw("SW0001")], vec![3, 3]);
        assert_eq!(archive.colors().len(), 1);
        assert_eq!(archive.invalid_codes(), &[3]);

        assert!(!archive.record_color(raw("SW0001")));
        assert!(archive.record_color(raw("SW0002")));
        assert!(!archive.record_invalid(3));

        assert!(archive.contains(1));
        assert!(archive.contains(2));
        assert!(archive.contains(3));
        assert!(!archive.contains(4));
    }

    #[tokio::test]
    async fn test_load_missing_files_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ColorArchive::load(dir.path().join(COLORS_FILE), dir.path().join(INVALID_CODES_FILE))
            .await
            .unwrap();
        assert!(archive.colors().is_empty());
        assert!(archive.invalid_codes().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let invalid = dir.path().join(INVALID_CODES_FILE);
        tokio::fs::write(&invalid, b"[1, 2,").await.unwrap();

        let result = ColorArchive::load(dir.path().join(COLORS_FILE), &invalid).await;
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let colors = dir.path().join(COLORS_FILE);
        let invalid = dir.path().join(INVALID_CODES_FILE);

        let archive = ColorArchive::from_parts(vec![raw("SW0005")], vec![6, 9]);
        archive.save(&colors, &invalid).await.unwrap();

        let reloaded = ColorArchive::load(&colors, &invalid).await.unwrap();
        assert_eq!(reloaded.colors(), archive.colors());
        assert_eq!(reloaded.invalid_codes(), &[6, 9]);

        let text = tokio::fs::read_to_string(&invalid).await.unwrap();
        assert!(text.contains('\n'));
    }
}
