//! Derived color metadata

use serde::Deserialize;
use serde::Serialize;

use crate::color::Hsl;
use crate::color::Hsv;
use crate::color::Lab;
use crate::color::Lch;
use crate::color::Rgb8;

/// The complete colorimetric description of one catalog color.
///
/// All coordinate tuples describe the same color. This is also the element
/// type of the bulk lookup file, so the serialized shape is stable:
///
/// ```json
/// { "number": "SW7008", "name": "Alabaster", "hex": "#EDEAE0",
///   "rgb": {"r":237,"g":234,"b":224}, "hsl": {...}, "hsv": {...},
///   "lab": {...}, "lch": {...}, "lrv": 79.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMetadata {
    /// Color code.
    pub number: String,
    pub name: String,
    pub hex: String,
    pub rgb: Rgb8,
    /// Degrees, percent, percent. Taken from the catalog, not re-derived.
    pub hsl: Hsl,
    /// Degrees, percent, percent. Derived from `rgb`.
    pub hsv: Hsv,
    pub lab: Lab,
    pub lch: Lch,
    /// Light reflectance value, percent.
    pub lrv: f64,
}
