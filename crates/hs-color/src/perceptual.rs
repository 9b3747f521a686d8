// SPDX-License-Identifier: MIT

//! Perceptual blending, distance and hue arithmetic.
//!
//! Straight hue-angle interpolation is cheap and fine for small nudges, but
//! a wide mix between distant hues sweeps through unrelated colors on the
//! way (blue → yellow passes through green). Past [`PERCEPTUAL_MIX_THRESHOLD`]
//! the mix is done in Oklab instead and the hue is read back off the result.

use crate::color::{Color, Hsl, normalize_hue};

/// Mix fractions above this blend in Oklab; at or below, hue angles lerp.
pub const PERCEPTUAL_MIX_THRESHOLD: f64 = 0.2;

/// Saturation/lightness of the probe colors used to blend two bare hues.
const PROBE_SATURATION: f64 = 70.0;
const PROBE_LIGHTNESS: f64 = 55.0;

/// Below this saturation a blended probe has no trustworthy hue.
const MIN_HUE_SATURATION: f64 = 4.0;

/// Perceptual distance: Euclidean Oklab distance scaled by 100.
///
/// The scale puts one just-noticeable difference (~0.02 in raw Oklab) at
/// about 2.0, comparable to classic Delta-E units.
#[must_use]
pub fn perceptual_distance(a: Color, b: Color) -> f64 {
    a.to_oklab().distance(b.to_oklab()) * 100.0
}

/// Blend two colors in Oklab. `fraction` 0 gives `a`, 1 gives `b`.
#[must_use]
pub fn perceptual_blend(a: Color, b: Color, fraction: f64) -> Color {
    let t = fraction.clamp(0.0, 1.0);
    Color::from_oklab(a.to_oklab().lerp(b.to_oklab(), t))
}

/// Move `from` toward `to` by `fraction`, choosing the blend rule by size.
///
/// At or under [`PERCEPTUAL_MIX_THRESHOLD`] this is a shortest-path hue
/// lerp. Above it both hues are rendered as probe colors, blended in
/// Oklab, and the hue of the blend is returned. Near-complementary hues
/// can blend to gray; those fall back to the angular lerp.
#[must_use]
pub fn blend_hue(from: f64, to: f64, fraction: f64) -> f64 {
    let t = fraction.clamp(0.0, 1.0);
    if t <= PERCEPTUAL_MIX_THRESHOLD {
        return interpolate_hue(from, to, t);
    }

    let a = Color::from_hsl(Hsl::new(from, PROBE_SATURATION, PROBE_LIGHTNESS));
    let b = Color::from_hsl(Hsl::new(to, PROBE_SATURATION, PROBE_LIGHTNESS));
    let mixed = perceptual_blend(a, b, t).to_hsl();
    if mixed.s < MIN_HUE_SATURATION {
        interpolate_hue(from, to, t)
    } else {
        mixed.h
    }
}

/// Interpolate between two hue angles along the shorter arc.
#[must_use]
pub fn interpolate_hue(h1: f64, h2: f64, t: f64) -> f64 {
    let diff = h2 - h1;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, h1))
}

/// Circular distance between two hues, in [0, 180].
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_colors_have_zero_distance() {
        let c = Color::rgb8(40, 90, 200);
        assert!(perceptual_distance(c, c) < 1e-9);
    }

    #[test]
    fn black_white_distance_is_about_100() {
        let d = perceptual_distance(Color::BLACK, Color::WHITE);
        assert!((d - 100.0).abs() < 0.5, "distance = {d}");
    }

    #[test]
    fn one_step_neighbours_are_near_duplicates() {
        let a = Color::rgb8(100, 120, 140);
        let b = Color::rgb8(101, 120, 141);
        assert!(perceptual_distance(a, b) < 2.0);
        assert!(perceptual_distance(a, Color::rgb8(100, 160, 140)) > 2.0);
    }

    #[test]
    fn blend_endpoints() {
        let a = Color::rgb8(255, 0, 0);
        let b = Color::rgb8(0, 0, 255);
        assert_eq!(perceptual_blend(a, b, 0.0), a);
        assert_eq!(perceptual_blend(a, b, 1.0), b);
        assert_eq!(perceptual_blend(a, b, -3.0), a);
    }

    #[test]
    fn blend_midpoint_sits_between() {
        let mid = perceptual_blend(Color::BLACK, Color::WHITE, 0.5);
        let l = mid.to_oklab().l;
        assert!((l - 0.5).abs() < 0.01, "midpoint L = {l}");
    }

    #[test]
    fn small_mix_is_angular() {
        assert!((blend_hue(10.0, 50.0, 0.1) - 14.0).abs() < 1e-9);
        assert!((blend_hue(350.0, 10.0, 0.2) - 354.0).abs() < 1e-9);
    }

    #[test]
    fn wide_mix_stays_between_endpoints() {
        // Red toward yellow: the result must land in the orange band,
        // not wander around the wheel.
        let h = blend_hue(0.0, 60.0, 0.5);
        assert!(h > 5.0 && h < 55.0, "blended hue = {h}");
    }

    #[test]
    fn interpolate_takes_short_way() {
        assert!((interpolate_hue(350.0, 10.0, 0.5) - 0.0).abs() < 1e-9);
        assert!((interpolate_hue(10.0, 350.0, 0.5) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn hue_distance_is_circular() {
        assert!((hue_distance(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((hue_distance(0.0, 180.0) - 180.0).abs() < 1e-9);
        assert!((hue_distance(30.0, 30.0)).abs() < 1e-9);
        assert!((hue_distance(-10.0, 710.0) - 0.0).abs() < 1e-9);
    }
}
