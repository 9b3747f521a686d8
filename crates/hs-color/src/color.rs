// SPDX-License-Identifier: MIT
//
// Color representations and conversions.
//
// Single-character variable names (r, g, b, h, s, l, c, m, x) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference formulas.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   hex ↔ sRGB (u8) ↔ HSL
//             │
//             └──── linear sRGB ↔ Oklab ↔ Oklch
//
// `Color` is stored as 8-bit sRGB because every value this engine emits
// ends up as a `#rrggbb` string. HSL values are rounded to whole units on
// the way out so that hex ↔ HSL round-trips stay within ±1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque sRGB color with 8 bits per channel.
///
/// The canonical text form is a lowercase 6-digit hex string (`#3366ff`),
/// which is also how it serializes.
///
/// ```
/// use hs_color::Color;
///
/// let blue = Color::hex("#36f").unwrap();
/// assert_eq!(blue.to_hex(), "#3366ff");
///
/// let hsl = blue.to_hsl();
/// assert_eq!((hsl.h, hsl.s, hsl.l), (225.0, 100.0, 60.0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb8(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb8(255, 255, 255);

    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from sRGB components in 0.0–1.0 (clamped, rounded).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgb8(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorInput`] for any other shape.
    pub fn hex(s: &str) -> Result<Self> {
        parse_hex(s).ok_or_else(|| Error::invalid(s, "expected #rgb or #rrggbb"))
    }

    /// Build a color from an HSL triple.
    #[must_use]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::from_hsl(Hsl::new(h, s, l))
    }

    /// Standard HSL → RGB, piecewise by 60° hue sector.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let s = hsl.s / 100.0;
        let l = hsl.l / 100.0;
        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let hp = normalize_hue(hsl.h) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

        let (r1, g1, b1) = match hp.floor() as u8 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = l - c / 2.0;
        Self::srgb(r1 + m, g1 + m, b1 + m)
    }

    /// Build a color from Oklab, gamut-mapping if needed.
    #[must_use]
    pub fn from_oklab(lab: Oklab) -> Self {
        let (r, g, b) = oklab_to_srgb(lab);
        if in_unit_range(r) && in_unit_range(g) && in_unit_range(b) {
            return Self::srgb(r, g, b);
        }
        Self::from_oklch(lab.to_oklch())
    }

    /// Build a color from Oklch, reducing chroma until it fits sRGB.
    ///
    /// Lightness and hue are preserved; only colorfulness is given up.
    #[must_use]
    pub fn from_oklch(lch: Oklch) -> Self {
        let lch = Oklch {
            l: lch.l.clamp(0.0, 1.0),
            ..lch
        };
        if lch.in_srgb_gamut() {
            let (r, g, b) = oklab_to_srgb(lch.to_oklab());
            return Self::srgb(r, g, b);
        }

        // Binary search for maximum in-gamut chroma
        let mut lo = 0.0;
        let mut hi = lch.c;
        for _ in 0..20 {
            let mid = (lo + hi) * 0.5;
            let candidate = Oklch { c: mid, ..lch };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let (r, g, b) = oklab_to_srgb(Oklch { c: lo, ..lch }.to_oklab());
        Self::srgb(r, g, b)
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// sRGB components in 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// HSL with every component rounded to a whole unit.
    ///
    /// Hue is wrapped into [0, 360); achromatic colors report hue 0.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let max8 = self.r.max(self.g).max(self.b);
        let min8 = self.r.min(self.g).min(self.b);
        let (r, g, b) = self.to_srgb();
        let max = f64::from(max8) / 255.0;
        let min = f64::from(min8) / 255.0;
        let l = (max + min) / 2.0;

        if max8 == min8 {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: (l * 100.0).round(),
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max8 == self.r {
            (g - b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max8 == self.g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: (h * 60.0).round() % 360.0,
            s: (s * 100.0).round(),
            l: (l * 100.0).round(),
        }
    }

    /// Convert to Oklab.
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let (r, g, b) = self.to_srgb();
        linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Convert to Oklch.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        self.to_oklab().to_oklch()
    }

    // ─── HSL adjustments ─────────────────────────────────────────────────

    /// Same hue and saturation, new HSL lightness (clamped to 0–100).
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::from_hsl(self.to_hsl().with_l(l))
    }

    /// Same hue and lightness, new HSL saturation (clamped to 0–100).
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::from_hsl(self.to_hsl().with_s(s))
    }

    /// True for grays and near-grays (HSL saturation below
    /// [`NEUTRAL_SATURATION`]).
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.to_hsl().s < NEUTRAL_SATURATION
    }
}

/// Saturation (percent) under which a color counts as neutral.
pub const NEUTRAL_SATURATION: f64 = 12.0;

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// Hue (degrees, [0, 360)), saturation and lightness (percent, [0, 100]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Build a normalized triple: hue wrapped, saturation/lightness clamped.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Like [`Hsl::new`] but refuses NaN or infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorInput`] if any component is not finite.
    pub fn try_new(h: f64, s: f64, l: f64) -> Result<Self> {
        if h.is_finite() && s.is_finite() && l.is_finite() {
            Ok(Self::new(h, s, l))
        } else {
            Err(Error::invalid(
                format!("hsl({h}, {s}, {l})"),
                "components must be finite",
            ))
        }
    }

    #[must_use]
    pub fn with_h(self, h: f64) -> Self {
        Self::new(h, self.s, self.l)
    }

    #[must_use]
    pub fn with_s(self, s: f64) -> Self {
        Self::new(self.h, s, self.l)
    }

    #[must_use]
    pub fn with_l(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }
}

/// Parse a hex string and return its rounded HSL triple.
///
/// # Errors
///
/// Returns [`Error::InvalidColorInput`] if `hex` is malformed.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Color::hex(hex).map(Color::to_hsl)
}

/// Format an HSL triple as `#rrggbb`.
///
/// # Errors
///
/// Returns [`Error::InvalidColorInput`] if any component is NaN or infinite.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> Result<String> {
    Hsl::try_new(h, s, l).map(|hsl| Color::from_hsl(hsl).to_hex())
}

// ─── Oklab / Oklch ───────────────────────────────────────────────────────────

/// A color in Oklab (Björn Ottosson's perceptually uniform space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    /// Cylindrical form.
    #[must_use]
    pub fn to_oklch(self) -> Oklch {
        let c = self.a.hypot(self.b);
        let h = if c < 1e-8 {
            0.0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch { l: self.l, c, h }
    }

    /// Euclidean distance in Oklab.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    /// Linear interpolation, `t` = 0 gives `self`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            a: (other.a - self.a).mul_add(t, self.a),
            b: (other.b - self.b).mul_add(t, self.b),
        }
    }
}

/// Oklab in lightness / chroma / hue form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness, 0.0 to 1.0.
    pub l: f64,
    /// Chroma, 0.0 to ~0.37 inside sRGB.
    pub c: f64,
    /// Hue angle in degrees.
    pub h: f64,
}

impl Oklch {
    #[must_use]
    pub fn to_oklab(self) -> Oklab {
        let h_rad = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * h_rad.cos(),
            b: self.c * h_rad.sin(),
        }
    }

    /// Whether this color is displayable without clamping.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklab_to_srgb(self.to_oklab());
        in_unit_range(r) && in_unit_range(g) && in_unit_range(b)
    }
}

// ─── Conversion math ─────────────────────────────────────────────────────────
//
// Oklab matrices from https://bottosson.github.io/posts/oklab/

/// Normalize a hue angle to [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Tolerance for gamut checks; sRGB round-off sits just outside 0–1.
const GAMUT_EPS: f64 = 1e-6;

#[inline]
fn in_unit_range(v: f64) -> bool {
    (-GAMUT_EPS..=1.0 + GAMUT_EPS).contains(&v)
}

fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> Oklab {
    let l = 0.051_445_995f64.mul_add(b, 0.412_221_47f64.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f64.mul_add(b, 0.211_903_5f64.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f64.mul_add(b, 0.088_302_46f64.mul_add(r, 0.281_718_84 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Oklab {
        l: 0.004_072_047f64.mul_add(-s_, 0.210_454_26f64.mul_add(l_, 0.793_617_8 * m_)),
        a: 0.450_593_7f64.mul_add(s_, 1.977_998_5f64.mul_add(l_, -(2.428_592_2 * m_))),
        b: 0.808_675_77f64.mul_add(-s_, 0.025_904_037f64.mul_add(l_, 0.782_771_77 * m_)),
    }
}

fn oklab_to_linear_srgb(lab: Oklab) -> (f64, f64, f64) {
    let l_ = 0.215_803_76f64.mul_add(lab.b, 0.396_337_78f64.mul_add(lab.a, lab.l));
    let m_ = 0.063_854_17f64.mul_add(-lab.b, 0.105_561_346f64.mul_add(-lab.a, lab.l));
    let s_ = 1.291_485_5f64.mul_add(-lab.b, 0.089_484_18f64.mul_add(-lab.a, lab.l));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_94f64.mul_add(s, 4.076_741_7f64.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f64.mul_add(-s, (-1.268_438f64).mul_add(l, 2.609_757_4 * m));
    let b = 1.707_614_7f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_6 * m)));
    (r, g, b)
}

fn oklab_to_srgb(lab: Oklab) -> (f64, f64, f64) {
    let (r, g, b) = oklab_to_linear_srgb(lab);
    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

/// Apply the sRGB transfer curve to a linear component.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Remove the sRGB transfer curve (IEC 61966-2-1 threshold).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #rgb — each nibble doubled
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hue_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    // ── HSL → hex ────────────────────────────────────────────────────────

    #[test]
    fn primaries_from_hsl() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0).unwrap(), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0).unwrap(), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0).unwrap(), "#0000ff");
    }

    #[test]
    fn grays_from_hsl() {
        assert_eq!(hsl_to_hex(200.0, 0.0, 0.0).unwrap(), "#000000");
        assert_eq!(hsl_to_hex(200.0, 0.0, 100.0).unwrap(), "#ffffff");
        assert_eq!(hsl_to_hex(0.0, 0.0, 50.0).unwrap(), "#808080");
    }

    #[test]
    fn hue_wraps_before_conversion() {
        assert_eq!(Color::hsl(360.0, 100.0, 50.0), Color::hsl(0.0, 100.0, 50.0));
        assert_eq!(Color::hsl(-120.0, 100.0, 50.0), Color::hsl(240.0, 100.0, 50.0));
    }

    #[test]
    fn non_finite_hsl_is_rejected() {
        let err = hsl_to_hex(f64::NAN, 50.0, 50.0).unwrap_err();
        assert!(matches!(err, Error::InvalidColorInput { .. }));
        assert!(hsl_to_hex(10.0, f64::INFINITY, 50.0).is_err());
    }

    // ── hex → HSL ────────────────────────────────────────────────────────

    #[test]
    fn known_hex_to_hsl() {
        let hsl = hex_to_hsl("#3366ff").unwrap();
        assert_eq!((hsl.h, hsl.s, hsl.l), (225.0, 100.0, 60.0));

        let red = hex_to_hsl("#ff0000").unwrap();
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        let gray = hex_to_hsl("#777777").unwrap();
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert_eq!(gray.l, 47.0);
    }

    #[test]
    fn neutral_threshold() {
        assert!(Color::hex("#777777").unwrap().is_neutral());
        assert!(Color::hex("#8a8580").unwrap().is_neutral());
        assert!(!Color::hex("#3366ff").unwrap().is_neutral());
        assert!(!Color::hsl(30.0, 20.0, 50.0).is_neutral());
    }

    #[test]
    fn shorthand_doubles_nibbles() {
        assert_eq!(Color::hex("#f80").unwrap(), Color::rgb8(0xff, 0x88, 0x00));
        assert_eq!(Color::hex("ABC").unwrap().to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_output_is_lowercase_and_padded() {
        assert_eq!(Color::rgb8(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#ggg", "zzzzzz", "#12 456"] {
            let err = Color::hex(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidColorInput { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hsl_hex_roundtrip_within_one_unit() {
        // Away from the gray axis the 8-bit quantization keeps every
        // component within a unit after rounding.
        for s in [70.0, 85.0, 100.0] {
            for l in [40.0, 50.0, 60.0] {
                let mut h = 0.0;
                while h < 360.0 {
                    let back = hex_to_hsl(&hsl_to_hex(h, s, l).unwrap()).unwrap();
                    assert!(hue_gap(back.h, h) <= 1.0, "h: {h} -> {}", back.h);
                    assert!((back.s - s).abs() <= 1.0, "s at h={h}: {s} -> {}", back.s);
                    assert!((back.l - l).abs() <= 1.0, "l at h={h}: {l} -> {}", back.l);
                    h += 7.0;
                }
            }
        }
    }

    #[test]
    fn hue_always_in_range() {
        for hex in ["#ff0001", "#fe00ff", "#010000", "#ffffff", "#000000"] {
            let hsl = hex_to_hsl(hex).unwrap();
            assert!((0.0..360.0).contains(&hsl.h), "{hex} -> {}", hsl.h);
        }
    }

    // ── Oklab ────────────────────────────────────────────────────────────

    #[test]
    fn oklab_white_and_black() {
        let white = Color::WHITE.to_oklab();
        assert!((white.l - 1.0).abs() < 1e-3, "white L = {}", white.l);
        assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);

        let black = Color::BLACK.to_oklab();
        assert!(black.l.abs() < 1e-6);
    }

    #[test]
    fn oklab_roundtrip_primaries() {
        for c in [
            Color::rgb8(255, 0, 0),
            Color::rgb8(0, 255, 0),
            Color::rgb8(0, 0, 255),
            Color::rgb8(51, 102, 255),
            Color::rgb8(12, 200, 140),
        ] {
            assert_eq!(Color::from_oklab(c.to_oklab()), c);
        }
    }

    #[test]
    fn out_of_gamut_oklch_is_chroma_reduced() {
        let wild = Oklch { l: 0.7, c: 0.5, h: 150.0 };
        assert!(!wild.in_srgb_gamut());
        let mapped = Color::from_oklch(wild);
        let back = mapped.to_oklch();
        assert!((back.l - 0.7).abs() < 0.02, "lightness drifted: {}", back.l);
        assert!(hue_gap(back.h, 150.0) < 5.0, "hue drifted: {}", back.h);
    }

    // ── Adjustments & traits ─────────────────────────────────────────────

    #[test]
    fn with_lightness_keeps_hue() {
        let c = Color::hsl(210.0, 80.0, 40.0).with_lightness(70.0);
        let hsl = c.to_hsl();
        assert!(hue_gap(hsl.h, 210.0) <= 1.0);
        assert!((hsl.l - 70.0).abs() <= 1.0);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c = Color::rgb8(0x33, 0x66, 0xff);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#3366ff\"");
        let back: Color = serde_json::from_str("\"#36F\"").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn display_and_from_str() {
        let c: Color = "#0a0B0c".parse().unwrap();
        assert_eq!(c.to_string(), "#0a0b0c");
        assert_eq!(format!("{c:?}"), "Color(#0a0b0c)");
    }
}
