//! Harmony engine — hue sets and per-mode derivation constants.
//!
//! A [`HarmonyMode`] names a fixed set of angular offsets from a base hue.
//! [`create_harmony`] turns a base hue into the ordered hue list consumers
//! see. [`HarmonySpec`] carries the numbers the token engine uses for the
//! same mode (where secondary/accent sit, how much surfaces drift).

use std::fmt;

use hs_color::normalize_hue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hues closer than this are the same hue for deduplication.
const DEDUP_EPS: f64 = 0.5;

/// Named rule for deriving related hues from one base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HarmonyMode {
    /// Base hue only; variation comes from saturation and lightness.
    Monochromatic,
    /// +180.
    Complementary,
    /// −30, +30.
    #[default]
    Analogous,
    /// +120, +240.
    Triadic,
    /// +150, +210 (complement ± 30).
    SplitComplementary,
    /// +60, +180, +240.
    Rectangle,
    /// +90, +180, +270.
    Square,
}

impl HarmonyMode {
    /// Offsets added to the base hue (the base itself is implicit).
    #[must_use]
    pub const fn offsets(self) -> &'static [f64] {
        match self {
            Self::Monochromatic => &[],
            Self::Complementary => &[180.0],
            Self::Analogous => &[-30.0, 30.0],
            Self::Triadic => &[120.0, 240.0],
            Self::SplitComplementary => &[180.0 - 30.0, 180.0 + 30.0],
            Self::Rectangle => &[60.0, 180.0, 240.0],
            Self::Square => &[90.0, 180.0, 270.0],
        }
    }

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monochromatic => "monochromatic",
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Rectangle => "rectangle",
            Self::Square => "square",
        }
    }

    /// Parse a mode name; anything unrecognized becomes `Analogous`.
    ///
    /// Case, `-`, `_` and spaces are ignored, so `"Split Complementary"`
    /// and `"split_complementary"` both resolve.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "monochromatic" | "mono" => Self::Monochromatic,
            "complementary" | "complement" => Self::Complementary,
            "analogous" => Self::Analogous,
            "triadic" | "triad" => Self::Triadic,
            "splitcomplementary" | "split" => Self::SplitComplementary,
            "rectangle" | "tetradic" => Self::Rectangle,
            "square" => Self::Square,
            _ => {
                tracing::debug!(mode = name, "unknown harmony mode, using analogous");
                Self::Analogous
            }
        }
    }

    /// All modes, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monochromatic,
            Self::Complementary,
            Self::Analogous,
            Self::Triadic,
            Self::SplitComplementary,
            Self::Rectangle,
            Self::Square,
        ]
    }

    /// Shorthand for `create_harmony(base_hue, self, false)`.
    #[must_use]
    pub fn hues(self, base_hue: f64) -> Vec<f64> {
        create_harmony(base_hue, self, false)
    }
}

impl fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for HarmonyMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for HarmonyMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Generate the ordered hue set for `mode` around `base_hue`.
///
/// The base hue is always included. Hues are wrapped into [0, 360),
/// deduplicated, and sorted ascending; `reverse` flips the final order.
/// Order is meaningful downstream (entity and named colors are assigned
/// by position), so this returns a `Vec`, not a set.
#[must_use]
pub fn create_harmony(base_hue: f64, mode: HarmonyMode, reverse: bool) -> Vec<f64> {
    let mut hues: Vec<f64> = std::iter::once(0.0)
        .chain(mode.offsets().iter().copied())
        .map(|offset| normalize_hue(base_hue + offset))
        .collect();

    hues.sort_by(f64::total_cmp);
    hues.dedup_by(|a, b| (*a - *b).abs() < DEDUP_EPS);

    if reverse {
        hues.reverse();
    }
    hues
}

// ---------------------------------------------------------------------------
// HarmonySpec
// ---------------------------------------------------------------------------

/// Per-mode derivation constants for the token engine.
///
/// Multipliers and mix fractions are the values at 100% slider intensity;
/// [`HarmonySpec::scaled`] applies the user's sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonySpec {
    pub secondary_hue_offset: f64,
    pub accent_hue_offset: f64,
    pub secondary_sat_mult: f64,
    pub accent_sat_mult: f64,
    /// How far surfaces drift from the base hue toward the secondary hue.
    pub surface_mix_fraction: f64,
    /// Same, for the page background (kept subtler than surfaces).
    pub background_mix_fraction: f64,
    /// Slider range (percent) this mode stays well-behaved in.
    pub intensity_range: (f64, f64),
}

/// Upper bound on any scaled mix fraction.
const MAX_MIX_FRACTION: f64 = 0.6;

impl HarmonySpec {
    #[must_use]
    pub const fn for_mode(mode: HarmonyMode) -> Self {
        match mode {
            HarmonyMode::Monochromatic => Self {
                secondary_hue_offset: 0.0,
                accent_hue_offset: 0.0,
                secondary_sat_mult: 0.55,
                accent_sat_mult: 1.2,
                surface_mix_fraction: 0.05,
                background_mix_fraction: 0.03,
                intensity_range: (40.0, 140.0),
            },
            HarmonyMode::Complementary => Self {
                secondary_hue_offset: 180.0,
                accent_hue_offset: 30.0,
                secondary_sat_mult: 0.85,
                accent_sat_mult: 1.1,
                surface_mix_fraction: 0.18,
                background_mix_fraction: 0.10,
                intensity_range: (40.0, 150.0),
            },
            HarmonyMode::Analogous => Self {
                secondary_hue_offset: 30.0,
                accent_hue_offset: -30.0,
                secondary_sat_mult: 0.9,
                accent_sat_mult: 1.05,
                surface_mix_fraction: 0.12,
                background_mix_fraction: 0.08,
                intensity_range: (40.0, 160.0),
            },
            HarmonyMode::Triadic => Self {
                secondary_hue_offset: 120.0,
                accent_hue_offset: 240.0,
                secondary_sat_mult: 0.85,
                accent_sat_mult: 1.0,
                surface_mix_fraction: 0.22,
                background_mix_fraction: 0.14,
                intensity_range: (40.0, 160.0),
            },
            HarmonyMode::SplitComplementary => Self {
                secondary_hue_offset: 150.0,
                accent_hue_offset: 210.0,
                secondary_sat_mult: 0.85,
                accent_sat_mult: 1.05,
                surface_mix_fraction: 0.2,
                background_mix_fraction: 0.12,
                intensity_range: (40.0, 150.0),
            },
            HarmonyMode::Rectangle => Self {
                secondary_hue_offset: 60.0,
                accent_hue_offset: 180.0,
                secondary_sat_mult: 0.9,
                accent_sat_mult: 1.0,
                surface_mix_fraction: 0.24,
                background_mix_fraction: 0.14,
                intensity_range: (40.0, 150.0),
            },
            HarmonyMode::Square => Self {
                secondary_hue_offset: 90.0,
                accent_hue_offset: 180.0,
                secondary_sat_mult: 0.9,
                accent_sat_mult: 1.0,
                surface_mix_fraction: 0.26,
                background_mix_fraction: 0.16,
                intensity_range: (40.0, 140.0),
            },
        }
    }

    /// Apply slider intensities (percent, 100 = neutral).
    ///
    /// `harmony_intensity` scales the secondary multiplier and both mix
    /// fractions; `accent_strength` scales the accent multiplier. Each
    /// slider is first clamped into this mode's safe range.
    #[must_use]
    pub fn scaled(self, harmony_intensity: f64, accent_strength: f64) -> Self {
        let (lo, hi) = self.intensity_range;
        let h = harmony_intensity.clamp(lo, hi) / 100.0;
        let a = accent_strength.clamp(lo, hi) / 100.0;
        Self {
            secondary_sat_mult: self.secondary_sat_mult * h,
            accent_sat_mult: self.accent_sat_mult * a,
            surface_mix_fraction: (self.surface_mix_fraction * h).min(MAX_MIX_FRACTION),
            background_mix_fraction: (self.background_mix_fraction * h).min(MAX_MIX_FRACTION),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn complementary_has_two_hues() {
        let hues = create_harmony(30.0, HarmonyMode::Complementary, false);
        assert_eq!(hues.len(), 2);
        assert!((hues[1] - 210.0).abs() <= 1.0, "second hue {}", hues[1]);
    }

    #[test]
    fn analogous_is_sorted() {
        let hues = create_harmony(100.0, HarmonyMode::Analogous, false);
        assert_eq!(hues, vec![70.0, 100.0, 130.0]);
    }

    #[test]
    fn wraps_and_sorts_across_zero() {
        let hues = create_harmony(10.0, HarmonyMode::Analogous, false);
        assert_eq!(hues, vec![10.0, 40.0, 340.0]);
    }

    #[test]
    fn counts_per_mode() {
        let expect = [
            (HarmonyMode::Monochromatic, 1),
            (HarmonyMode::Complementary, 2),
            (HarmonyMode::Analogous, 3),
            (HarmonyMode::Triadic, 3),
            (HarmonyMode::SplitComplementary, 3),
            (HarmonyMode::Rectangle, 4),
            (HarmonyMode::Square, 4),
        ];
        for (mode, n) in expect {
            assert_eq!(create_harmony(47.0, mode, false).len(), n, "{mode}");
        }
    }

    #[test]
    fn reverse_is_exact_reverse() {
        for &mode in HarmonyMode::all() {
            let forward = create_harmony(222.0, mode, false);
            let mut backward = create_harmony(222.0, mode, true);
            backward.reverse();
            assert_eq!(forward, backward, "{mode}");
        }
    }

    #[test]
    fn all_hues_in_range() {
        for &mode in HarmonyMode::all() {
            for base in [-30.0, 0.0, 90.0, 359.9, 720.0] {
                for h in create_harmony(base, mode, false) {
                    assert!((0.0..360.0).contains(&h), "{mode} base={base}: {h}");
                }
            }
        }
    }

    #[test]
    fn no_duplicates() {
        for &mode in HarmonyMode::all() {
            let hues = create_harmony(0.0, mode, false);
            for pair in hues.windows(2) {
                assert!(pair[1] - pair[0] >= DEDUP_EPS, "{mode}: {hues:?}");
            }
        }
    }

    #[test]
    fn from_name_is_forgiving() {
        assert_eq!(HarmonyMode::from_name("Split Complementary"), HarmonyMode::SplitComplementary);
        assert_eq!(HarmonyMode::from_name("split_complementary"), HarmonyMode::SplitComplementary);
        assert_eq!(HarmonyMode::from_name("SQUARE"), HarmonyMode::Square);
        assert_eq!(HarmonyMode::from_name("tetradic"), HarmonyMode::Rectangle);
    }

    #[test]
    fn unknown_name_falls_back_to_analogous() {
        assert_eq!(HarmonyMode::from_name("vaporwave"), HarmonyMode::Analogous);
        assert_eq!(HarmonyMode::from_name(""), HarmonyMode::Analogous);
    }

    #[test]
    fn names_roundtrip() {
        for &mode in HarmonyMode::all() {
            assert_eq!(HarmonyMode::from_name(mode.name()), mode);
        }
    }

    #[test]
    fn serde_tolerates_unknown_modes() {
        let mode: HarmonyMode = serde_json::from_str("\"triadic\"").unwrap();
        assert_eq!(mode, HarmonyMode::Triadic);
        let mode: HarmonyMode = serde_json::from_str("\"nonsense\"").unwrap();
        assert_eq!(mode, HarmonyMode::Analogous);
        assert_eq!(serde_json::to_string(&HarmonyMode::Rectangle).unwrap(), "\"rectangle\"");
    }

    // ── HarmonySpec ─────────────────────────────────────────────────

    #[test]
    fn neutral_sliders_leave_spec_unchanged() {
        let spec = HarmonySpec::for_mode(HarmonyMode::Triadic);
        assert_eq!(spec.scaled(100.0, 100.0), spec);
    }

    #[test]
    fn sliders_are_clamped_to_safe_range() {
        let spec = HarmonySpec::for_mode(HarmonyMode::Square);
        let wild = spec.scaled(1000.0, -50.0);
        let capped = spec.scaled(140.0, 40.0);
        assert_eq!(wild, capped);
    }

    #[test]
    fn intensity_scales_mix_fractions() {
        let spec = HarmonySpec::for_mode(HarmonyMode::Analogous);
        let strong = spec.scaled(150.0, 100.0);
        assert!(strong.surface_mix_fraction > spec.surface_mix_fraction);
        assert!(strong.secondary_sat_mult > spec.secondary_sat_mult);
        assert!((strong.accent_sat_mult - spec.accent_sat_mult).abs() < 1e-12);
    }
}
