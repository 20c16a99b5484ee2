//! Color math for the post-process stage
//!
//! HSV conversions and the posterize ramp that maps quantized luminance bands
//! to an analogous gradient around the theme hue: shadows toward the cooler
//! neighbor, mids at the theme, highlights toward the warmer neighbor, with
//! an optional complementary accent bleeding into the brightest bands only.

use glam::Vec3;

/// Linear interpolation
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep between two edges
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// HSV to linear RGB, all channels in `[0, 1]`, hue wrapping
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let (h, s, v) = (hsv.x, hsv.y, hsv.z);
    let channel = |offset: f32| {
        let p = ((h + offset).rem_euclid(1.0) * 6.0 - 3.0).abs();
        v * mix(1.0, (p - 1.0).clamp(0.0, 1.0), s)
    };
    Vec3::new(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

/// Linear RGB to HSV
pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let (r, g, b) = (rgb.x, rgb.y, rgb.z);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let sat = if max <= f32::EPSILON { 0.0 } else { delta / max };

    Vec3::new(hue, sat, max)
}

/// Map luminance to a posterized color band around the theme hue
///
/// `levels` is the number of quantization bands (callers gate on
/// `levels >= 2`), `hue_spread` the analogous offset across bands on the
/// color wheel, `complement_mix` the strength of the complementary accent in
/// the highlight bands.
pub fn posterize(lum: f32, theme: Vec3, levels: f32, hue_spread: f32, complement_mix: f32) -> Vec3 {
    let theme_hsv = rgb_to_hsv(theme);
    let base_hue = theme_hsv.x;
    let base_sat = theme_hsv.y.max(0.6);

    // Quantize brightness into bands
    let q = (lum * levels).floor() / levels;

    // Analogous hue ramp: shadows cooler, highlights warmer
    let hue_t = q * 2.0 - 1.0;
    let hue = (base_hue + hue_t * hue_spread).rem_euclid(1.0);

    // Saturation richest at mid-tones, floored in the extremes
    let sat_curve = 1.0 - hue_t * hue_t * 0.5;
    let mut sat = base_sat * sat_curve;
    sat = sat.max(base_sat * 0.3);
    sat = mix(sat * 1.15, sat, smoothstep(0.0, 0.4, q));

    // Value ramps from near-black to bright
    let val = mix(0.06, 1.2, q).clamp(0.0, 1.0);

    let mut color = hsv_to_rgb(Vec3::new(hue, sat, val));

    // Complementary accent only in the bright bands
    if complement_mix > 0.001 {
        let comp_hue = (base_hue + 0.5).rem_euclid(1.0);
        let comp = hsv_to_rgb(Vec3::new(comp_hue, base_sat * 0.85, val));
        let blend = smoothstep(0.55, 1.0, q) * complement_mix;
        color = color.lerp(comp, blend);
    }

    color
}
