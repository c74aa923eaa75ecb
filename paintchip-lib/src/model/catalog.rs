//! Catalog color records

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::color::Rgb8;
use crate::error::FieldError;

/// A color record as returned by the remote color catalog.
///
/// Numeric values arrive as decimal strings and are kept that way here; use
/// [`RawCatalogColor::numerics`] to parse them. Fields the pipeline does not
/// use are preserved in `extra` so a cached record round-trips unchanged.
///
/// Deserialization fails if any of the required string fields is missing or
/// has a non-string type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogColor {
    /// Color code, e.g. `SW7008`.
    pub color_number: String,
    /// Display name.
    pub name: String,
    /// Hex string, as reported by the catalog (no guaranteed `#` prefix).
    pub hex: String,
    /// 8-bit red channel, base 10.
    pub red: String,
    /// 8-bit green channel, base 10.
    pub green: String,
    /// 8-bit blue channel, base 10.
    pub blue: String,
    /// Hue as a 0..1 fraction of 360°.
    pub hue: String,
    /// Saturation as a 0..1 fraction.
    pub saturation: String,
    /// Lightness as a 0..1 fraction.
    pub lightness: String,
    /// Light reflectance value, percent.
    pub lrv: String,
    #[serde(default)]
    pub coordinating_colors: Vec<ColorLink>,
    #[serde(default)]
    pub color_strip_colors: Vec<ColorLink>,
    #[serde(default)]
    pub similar_colors: Vec<ColorLink>,
    /// Every other field the catalog sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawCatalogColor {
    /// Parses the string numerics into a validated [`CatalogNumerics`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Invalid`] for the first field that does not parse,
    /// including floats that parse to NaN or infinity.
    pub fn numerics(&self) -> Result<CatalogNumerics, FieldError> {
        Ok(CatalogNumerics {
            rgb: Rgb8 {
                r: parse_int("red", &self.red)?,
                g: parse_int("green", &self.green)?,
                b: parse_int("blue", &self.blue)?,
            },
            hue: parse_fraction("hue", &self.hue)?,
            saturation: parse_fraction("saturation", &self.saturation)?,
            lightness: parse_fraction("lightness", &self.lightness)?,
            lrv: parse_fraction("lrv", &self.lrv)?,
        })
    }
}

/// A link to a related color (coordinating, strip or similar colors).
///
/// Presentation-only; the metadata pipeline never reads these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorLink {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validated numeric fields of a [`RawCatalogColor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogNumerics {
    pub rgb: Rgb8,
    /// Hue as a 0..1 fraction of a full turn.
    pub hue: f64,
    /// Saturation as a 0..1 fraction.
    pub saturation: f64,
    /// Lightness as a 0..1 fraction.
    pub lightness: f64,
    /// Light reflectance value, percent.
    pub lrv: f64,
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, FieldError> {
    value
        .trim()
        .parse()
        .map_err(|_| FieldError::invalid(field, value, "base-10 integer 0-255"))
}

fn parse_fraction(field: &'static str, value: &str) -> Result<f64, FieldError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::invalid(field, value, "finite decimal"))
}
