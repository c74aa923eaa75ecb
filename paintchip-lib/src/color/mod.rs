//! Color coordinate types and color space conversion
//!
//! All coordinates are plain `f64` tuples. Units at the boundaries are:
//!
//! - RGB: 0–255 per channel (not clamped, may be fractional)
//! - HSL / HSV: hue in degrees 0–360, the other two components in percent
//!   (HSL) or as 0..1 fractions (HSV, see [`rgb_to_hsv`])
//! - XYZ: D65 / 2° observer, Y in 0–100
//! - LAB: L in 0–100, a/b unbounded
//! - LCH: L in 0–100, chroma ≥ 0, hue in degrees

mod convert;

pub use convert::*;

use serde::Deserialize;
use serde::Serialize;

/// An sRGB color with channels on the 0–255 scale.
///
/// Channels are `f64` because conversions back from LAB/LCH may land between
/// (or outside) integer values. Use [`Rgb::to_rgb8`] to quantize.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Creates a new RGB color.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Returns a copy with every channel clamped to 0–255.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 255.0),
            g: self.g.clamp(0.0, 255.0),
            b: self.b.clamp(0.0, 255.0),
        }
    }

    /// Returns `true` if every channel is within 0–255.
    pub fn in_gamut(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=255.0).contains(c))
    }

    /// Clamps and rounds to 8-bit channels.
    pub fn to_rgb8(self) -> Rgb8 {
        let c = self.clamped();
        Rgb8 {
            r: c.r.round() as u8,
            g: c.g.round() as u8,
            b: c.b.round() as u8,
        }
    }

    /// Converts to CIE-LAB via XYZ.
    pub fn to_lab(self) -> Lab {
        xyz_to_lab(rgb_to_xyz(self))
    }
}

impl From<Rgb8> for Rgb {
    fn from(rgb: Rgb8) -> Self {
        Self {
            r: f64::from(rgb.r),
            g: f64::from(rgb.g),
            b: f64::from(rgb.b),
        }
    }
}

/// An 8-bit sRGB color, as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Creates a new 8-bit RGB color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Hue (degrees), saturation and lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue (degrees), saturation and value.
///
/// [`rgb_to_hsv`] yields `s` and `v` as 0..1 fractions; [`ColorMetadata`]
/// stores them in percent.
///
/// [`ColorMetadata`]: crate::model::ColorMetadata
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// CIE-XYZ tristimulus values (D65, 2° observer, Y scaled to 0–100).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIE-LAB coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Converts back to (unclamped) sRGB via XYZ.
    pub fn to_rgb(self) -> Rgb {
        xyz_to_rgb(lab_to_xyz(self))
    }

    /// Converts to the polar LCH form.
    pub fn to_lch(self) -> Lch {
        lab_to_lch(self)
    }
}

/// CIE-LCH coordinates: lightness, chroma and hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    /// Converts back to (unclamped) sRGB via LAB and XYZ.
    pub fn to_rgb(self) -> Rgb {
        lch_to_lab(self).to_rgb()
    }
}
