//! Color space conversion functions
//!
//! Pure, deterministic functions between RGB, HSL, HSV, XYZ, LAB and LCH.
//! None of them reject input: a NaN channel yields NaN coordinates.

use super::Hsl;
use super::Hsv;
use super::Lab;
use super::Lch;
use super::Rgb;
use super::Xyz;

/// D65 reference white, 2° observer.
pub const D65_WHITE: Xyz = Xyz {
    x: 95.047,
    y: 100.0,
    z: 108.883,
};

const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;
const SRGB_ENCODED_THRESHOLD: f64 = 0.0031308;
const SRGB_LINEAR_SLOPE: f64 = 12.92;
const SRGB_GAMMA: f64 = 2.4;
const SRGB_OFFSET: f64 = 0.055;

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

// =============================================================================
// RGB <-> HSV / HSL
// =============================================================================

// `f64::max` drops NaN operands; these keep them.
fn max3(a: f64, b: f64, c: f64) -> f64 {
    if a.is_nan() || b.is_nan() || c.is_nan() {
        f64::NAN
    } else {
        a.max(b).max(c)
    }
}

fn min3(a: f64, b: f64, c: f64) -> f64 {
    if a.is_nan() || b.is_nan() || c.is_nan() {
        f64::NAN
    } else {
        a.min(b).min(c)
    }
}

/// Converts 0–255 RGB channels to HSV.
///
/// The hue is returned in degrees `[0, 360)`; saturation and value are 0..1
/// fractions. Black and greys have a hue of 0, and black has a saturation of 0.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = max3(r, g, b);
    let min = min3(r, g, b);
    let delta = max - min;

    let sector = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        h: sector * 60.0,
        s,
        v: max,
    }
}

/// Converts RGB to HSL (degrees, percent, percent).
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r / 255.0;
    let g = rgb.g / 255.0;
    let b = rgb.b / 255.0;

    let max = max3(r, g, b);
    let min = min3(r, g, b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl {
        h: h * 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Converts HSL (degrees, percent, percent) to RGB on the 0–255 scale.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    if s == 0.0 {
        return Rgb::new(l * 255.0, l * 255.0, l * 255.0);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// =============================================================================
// RGB <-> XYZ
// =============================================================================

fn srgb_to_linear(c: f64) -> f64 {
    if c > SRGB_LINEAR_THRESHOLD {
        ((c + SRGB_OFFSET) / (1.0 + SRGB_OFFSET)).powf(SRGB_GAMMA)
    } else {
        c / SRGB_LINEAR_SLOPE
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c > SRGB_ENCODED_THRESHOLD {
        (1.0 + SRGB_OFFSET) * c.powf(1.0 / SRGB_GAMMA) - SRGB_OFFSET
    } else {
        SRGB_LINEAR_SLOPE * c
    }
}

/// Converts gamma-encoded sRGB (0–255) to XYZ (D65, Y in 0–100).
pub fn rgb_to_xyz(rgb: Rgb) -> Xyz {
    let r = srgb_to_linear(rgb.r / 255.0) * 100.0;
    let g = srgb_to_linear(rgb.g / 255.0) * 100.0;
    let b = srgb_to_linear(rgb.b / 255.0) * 100.0;

    Xyz {
        x: r * 0.4124 + g * 0.3576 + b * 0.1805,
        y: r * 0.2126 + g * 0.7152 + b * 0.0722,
        z: r * 0.0193 + g * 0.1192 + b * 0.9505,
    }
}

/// Converts XYZ back to gamma-encoded sRGB on the 0–255 scale.
///
/// The result is not clamped; out-of-gamut input yields channels outside 0–255.
pub fn xyz_to_rgb(xyz: Xyz) -> Rgb {
    let x = xyz.x / 100.0;
    let y = xyz.y / 100.0;
    let z = xyz.z / 100.0;

    let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
    let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
    let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

    Rgb::new(
        linear_to_srgb(r) * 255.0,
        linear_to_srgb(g) * 255.0,
        linear_to_srgb(b) * 255.0,
    )
}

// =============================================================================
// XYZ <-> LAB <-> LCH
// =============================================================================

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t + LAB_OFFSET
    }
}

fn lab_f_inv(t: f64) -> f64 {
    let cubed = t.powi(3);
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (t - LAB_OFFSET) / LAB_KAPPA
    }
}

/// Converts XYZ to CIE-LAB against the D65 white point.
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Converts CIE-LAB back to XYZ against the D65 white point.
pub fn lab_to_xyz(lab: Lab) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    Xyz {
        x: D65_WHITE.x * lab_f_inv(fx),
        y: D65_WHITE.y * lab_f_inv(fy),
        z: D65_WHITE.z * lab_f_inv(fz),
    }
}

/// Converts LAB to its polar LCH form.
///
/// Non-positive angles wrap as `360 - |angle|`, so a neutral color
/// (`a == b == 0`) and the positive a-axis both get a hue of 360, not 0.
pub fn lab_to_lch(lab: Lab) -> Lch {
    let c = lab.a.hypot(lab.b);
    let angle = lab.b.atan2(lab.a);
    let h = if angle > 0.0 {
        angle.to_degrees()
    } else {
        360.0 - angle.abs().to_degrees()
    };

    Lch { l: lab.l, c, h }
}

/// Converts LCH back to LAB.
pub fn lch_to_lab(lch: Lch) -> Lab {
    let h = lch.h.to_radians();
    Lab {
        l: lch.l,
        a: h.cos() * lch.c,
        b: h.sin() * lch.c,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn channels() -> impl Iterator<Item = f64> + Clone {
        (0..=255u32).step_by(5).map(f64::from)
    }

    fn assert_rgb_close(expected: Rgb, actual: Rgb, tolerance: f64) {
        assert!(
            (expected.r - actual.r).abs() <= tolerance
                && (expected.g - actual.g).abs() <= tolerance
                && (expected.b - actual.b).abs() <= tolerance,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_hsv_black_and_white() {
        assert_eq!(rgb_to_hsv(0.0, 0.0, 0.0), Hsv { h: 0.0, s: 0.0, v: 0.0 });
        assert_eq!(rgb_to_hsv(255.0, 255.0, 255.0), Hsv { h: 0.0, s: 0.0, v: 1.0 });
    }

    #[test]
    fn test_hsv_hue_in_degrees() {
        assert_abs_diff_eq!(rgb_to_hsv(255.0, 0.0, 0.0).h, 0.0);
        assert_abs_diff_eq!(rgb_to_hsv(0.0, 255.0, 0.0).h, 120.0);
        assert_abs_diff_eq!(rgb_to_hsv(0.0, 0.0, 255.0).h, 240.0);
        // Magenta sits on the red branch with a negative sector.
        assert_abs_diff_eq!(rgb_to_hsv(255.0, 0.0, 128.0).h, 329.882, epsilon = 1e-3);
    }

    #[test]
    fn test_red_reference_values() {
        let red = Rgb::new(255.0, 0.0, 0.0);

        let hsl = rgb_to_hsl(red);
        assert_abs_diff_eq!(hsl.h, 0.0, epsilon = 0.5);
        assert_abs_diff_eq!(hsl.s, 100.0, epsilon = 0.5);
        assert_abs_diff_eq!(hsl.l, 50.0, epsilon = 0.5);

        let lab = red.to_lab();
        assert_abs_diff_eq!(lab.l, 53.2, epsilon = 0.5);
        assert_abs_diff_eq!(lab.a, 80.1, epsilon = 0.5);
        assert_abs_diff_eq!(lab.b, 67.2, epsilon = 0.5);

        let lch = lab_to_lch(lab);
        assert_abs_diff_eq!(lch.l, 53.2, epsilon = 0.5);
        assert_abs_diff_eq!(lch.c, 104.6, epsilon = 0.5);
        assert_abs_diff_eq!(lch.h, 39.9, epsilon = 0.5);
    }

    #[test]
    fn test_white_maps_to_reference_white() {
        let lab = Rgb::new(255.0, 255.0, 255.0).to_lab();
        assert_abs_diff_eq!(lab.l, 100.0, epsilon = 0.01);
        assert_abs_diff_eq!(lab.a, 0.0, epsilon = 0.05);
        assert_abs_diff_eq!(lab.b, 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_hsl_round_trip() {
        for r in channels() {
            for g in channels() {
                for b in channels() {
                    let rgb = Rgb::new(r, g, b);
                    assert_rgb_close(rgb, hsl_to_rgb(rgb_to_hsl(rgb)), 1.0);
                }
            }
        }
    }

    #[test]
    fn test_lab_round_trip() {
        for r in channels() {
            for g in channels() {
                for b in channels() {
                    let rgb = Rgb::new(r, g, b);
                    let back = xyz_to_rgb(lab_to_xyz(xyz_to_lab(rgb_to_xyz(rgb))));
                    assert_rgb_close(rgb, back, 1.0);
                }
            }
        }
    }

    #[test]
    fn test_round_trips_across_one_full_channel() {
        // Stride 1 through the sRGB linear/gamma threshold at 10..11.
        for v in 0..=255u32 {
            for (other_a, other_b) in [(0.0, 0.0), (128.0, 64.0), (255.0, 255.0)] {
                let rgb = Rgb::new(f64::from(v), other_a, other_b);
                assert_rgb_close(rgb, hsl_to_rgb(rgb_to_hsl(rgb)), 1.0);
                assert_rgb_close(rgb, rgb.to_lab().to_rgb(), 1.0);
            }
        }
    }

    #[test]
    #[ignore = "exhaustive over all 16.7M triples; run with --release"]
    fn test_round_trips_exhaustive() {
        for r in 0..=255u32 {
            for g in 0..=255u32 {
                for b in 0..=255u32 {
                    let rgb = Rgb::new(f64::from(r), f64::from(g), f64::from(b));
                    assert_rgb_close(rgb, hsl_to_rgb(rgb_to_hsl(rgb)), 1.0);
                    assert_rgb_close(rgb, rgb.to_lab().to_rgb(), 1.0);
                }
            }
        }
    }

    #[test]
    fn test_lch_round_trip() {
        for (a, b) in [(10.0, 20.0), (-35.5, 12.25), (-0.5, -80.0), (64.0, -3.0), (0.0, 1.0)] {
            let lab = Lab { l: 50.0, a, b };
            let back = lch_to_lab(lab_to_lch(lab));
            assert_abs_diff_eq!(back.a, a, epsilon = 1e-6);
            assert_abs_diff_eq!(back.b, b, epsilon = 1e-6);
            assert_abs_diff_eq!(back.l, 50.0);
        }
    }

    #[test]
    fn test_lch_hue_wraps_non_positive_angles() {
        let neutral = lab_to_lch(Lab { l: 40.0, a: 0.0, b: 0.0 });
        assert_eq!(neutral.c, 0.0);
        assert_eq!(neutral.h, 360.0);

        let positive_a = lab_to_lch(Lab { l: 40.0, a: 5.0, b: 0.0 });
        assert_eq!(positive_a.h, 360.0);

        let below_axis = lab_to_lch(Lab { l: 40.0, a: 1.0, b: -1.0 });
        assert_abs_diff_eq!(below_axis.h, 315.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_gamut_is_not_clamped() {
        let rgb = Lch { l: 50.0, c: 150.0, h: 140.0 }.to_rgb();
        assert!(!rgb.in_gamut());
        let clamped = rgb.clamped();
        assert!(clamped.in_gamut());
    }

    #[test]
    fn test_nan_propagates() {
        let lab = Rgb::new(f64::NAN, 0.0, 0.0).to_lab();
        assert!(lab.a.is_nan());
        let hsv = rgb_to_hsv(f64::NAN, 0.0, 0.0);
        assert!(hsv.h.is_nan());
        assert!(hsv.v.is_nan());
        assert!(rgb_to_hsl(Rgb::new(0.0, f64::NAN, 0.0)).l.is_nan());
    }
}
