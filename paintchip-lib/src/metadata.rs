//! Color metadata calculation and lookup
//!
//! [`calculate_metadata`] turns a catalog record into a complete
//! [`ColorMetadata`]. The catalog's own HSL values are kept as reported;
//! HSV, LAB and LCH are derived from the 8-bit RGB triple.
//!
//! [`MetadataService`] answers metadata queries by code: the bulk lookup
//! table first, then the (cached) catalog.

use std::sync::Arc;

use crate::color::Hsl;
use crate::color::Hsv;
use crate::color::Rgb;
use crate::color::lab_to_lch;
use crate::color::rgb_to_hsv;
use crate::color::rgb_to_xyz;
use crate::color::xyz_to_lab;
use crate::error::Error;
use crate::error::FieldError;
use crate::lookup::LookupTable;
use crate::model::ColorMetadata;
use crate::model::RawCatalogColor;
use crate::CatalogClient;

/// Computes the full metadata for a catalog record.
///
/// # Errors
///
/// Returns a [`FieldError`] if a numeric field of the record does not parse.
pub fn calculate_metadata(raw: &RawCatalogColor) -> Result<ColorMetadata, FieldError> {
    let numerics = raw.numerics()?;
    let rgb = Rgb::from(numerics.rgb);

    let hsv = rgb_to_hsv(rgb.r, rgb.g, rgb.b);
    let lab = xyz_to_lab(rgb_to_xyz(rgb));
    let lch = lab_to_lch(lab);

    Ok(ColorMetadata {
        number: raw.color_number.clone(),
        name: raw.name.clone(),
        hex: raw.hex.clone(),
        rgb: numerics.rgb,
        hsl: Hsl {
            h: numerics.hue * 360.0,
            s: numerics.saturation * 100.0,
            l: numerics.lightness * 100.0,
        },
        hsv: Hsv {
            h: hsv.h,
            s: hsv.s * 100.0,
            v: hsv.v * 100.0,
        },
        lab,
        lch,
        lrv: numerics.lrv,
    })
}

/// Resolves color codes to metadata.
///
/// Construct one per process and share it; the lookup table it holds is
/// loaded on first use and kept for the service's lifetime.
#[derive(Debug, Clone)]
pub struct MetadataService {
    client: CatalogClient,
    lookup: Arc<LookupTable>,
}

impl MetadataService {
    /// Creates a service over a catalog client and a lookup table.
    pub fn new(client: CatalogClient, lookup: Arc<LookupTable>) -> Self {
        Self { client, lookup }
    }

    /// Returns the catalog client.
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Returns the bulk lookup table.
    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    /// Returns the metadata for `code`, or `None` if the catalog does not know it.
    ///
    /// The lookup table is matched by exact code. On a miss the color comes
    /// from [`CatalogClient::get_color`] and its metadata is calculated.
    ///
    /// # Errors
    ///
    /// A lookup table that fails to load is an error, as are cache failures
    /// and malformed catalog records.
    pub async fn get_color_metadata(&self, code: &str) -> Result<Option<ColorMetadata>, Error> {
        if let Some(metadata) = self.lookup.find(code).await? {
            log::debug!("Lookup table hit for {}", code);
            return Ok(Some(metadata.clone()));
        }

        match self.client.get_color(code).await? {
            Some(color) => Ok(Some(calculate_metadata(&color)?)),
            None => Ok(None),
        }
    }
}
