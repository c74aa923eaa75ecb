//! Scalar metrics over color metadata
//!
//! A [`Metric`] picks one coordinate out of a [`ColorMetadata`], for use as
//! an axis when plotting colors against each other.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::model::ColorMetadata;

/// One coordinate of a [`ColorMetadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    HslHue,
    HslSaturation,
    HslLightness,
    HsvHue,
    HsvSaturation,
    HsvValue,
    LabLightness,
    LabA,
    LabB,
    LchLightness,
    LchChroma,
    LchHue,
    Lrv,
    RgbRed,
    RgbGreen,
    RgbBlue,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 16] = [
        Metric::HslHue,
        Metric::HslSaturation,
        Metric::HslLightness,
        Metric::HsvHue,
        Metric::HsvSaturation,
        Metric::HsvValue,
        Metric::LabLightness,
        Metric::LabA,
        Metric::LabB,
        Metric::LchLightness,
        Metric::LchChroma,
        Metric::LchHue,
        Metric::Lrv,
        Metric::RgbRed,
        Metric::RgbGreen,
        Metric::RgbBlue,
    ];

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::HslHue => "HSL - Hue",
            Metric::HslSaturation => "HSL - Saturation",
            Metric::HslLightness => "HSL - Luminosity",
            Metric::HsvHue => "HSV - Hue",
            Metric::HsvSaturation => "HSV - Saturation",
            Metric::HsvValue => "HSV - Value",
            Metric::LabLightness => "LAB - Luminosity",
            Metric::LabA => "LAB - A",
            Metric::LabB => "LAB - B",
            Metric::LchLightness => "LCH - Luminosity",
            Metric::LchChroma => "LCH - Chroma",
            Metric::LchHue => "LCH - Hue",
            Metric::Lrv => "LRV",
            Metric::RgbRed => "RGB - Red",
            Metric::RgbGreen => "RGB - Green",
            Metric::RgbBlue => "RGB - Blue",
        }
    }

    /// Short kebab-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Metric::HslHue => "hsl-hue",
            Metric::HslSaturation => "hsl-saturation",
            Metric::HslLightness => "hsl-lightness",
            Metric::HsvHue => "hsv-hue",
            Metric::HsvSaturation => "hsv-saturation",
            Metric::HsvValue => "hsv-value",
            Metric::LabLightness => "lab-lightness",
            Metric::LabA => "lab-a",
            Metric::LabB => "lab-b",
            Metric::LchLightness => "lch-lightness",
            Metric::LchChroma => "lch-chroma",
            Metric::LchHue => "lch-hue",
            Metric::Lrv => "lrv",
            Metric::RgbRed => "rgb-red",
            Metric::RgbGreen => "rgb-green",
            Metric::RgbBlue => "rgb-blue",
        }
    }

    /// Reads this metric from a color.
    pub fn value(self, m: &ColorMetadata) -> f64 {
        match self {
            Metric::HslHue => m.hsl.h,
            Metric::HslSaturation => m.hsl.s,
            Metric::HslLightness => m.hsl.l,
            Metric::HsvHue => m.hsv.h,
            Metric::HsvSaturation => m.hsv.s,
            Metric::HsvValue => m.hsv.v,
            Metric::LabLightness => m.lab.l,
            Metric::LabA => m.lab.a,
            Metric::LabB => m.lab.b,
            Metric::LchLightness => m.lch.l,
            Metric::LchChroma => m.lch.c,
            Metric::LchHue => m.lch.h,
            Metric::Lrv => m.lrv,
            Metric::RgbRed => f64::from(m.rgb.r),
            Metric::RgbGreen => f64::from(m.rgb.g),
            Metric::RgbBlue => f64::from(m.rgb.b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// One color placed on a pair of metric axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub number: String,
    pub name: String,
    pub hex: String,
    pub x: f64,
    pub y: f64,
}

/// Places each color on the `x` and `y` metric axes.
pub fn project(colors: &[ColorMetadata], x: Metric, y: Metric) -> Vec<Point> {
    colors
        .iter()
        .map(|m| Point {
            number: m.number.clone(),
            name: m.name.clone(),
            hex: m.hex.clone(),
            x: x.value(m),
            y: y.value(m),
        })
        .collect()
}
