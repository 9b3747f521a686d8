//! Named presets: ready-to-use generation parameters.
//!
//! Each preset is a specific combination of base color, harmony mode,
//! theme mode and sliders that produces a distinctive, coherent theme.
//! Shuffling and "surprise me" draw from an injected seed, never from a
//! global random source.

use crate::harmony::HarmonyMode;
use crate::params::{GenerationParameters, ThemeMode};
use crate::rng::SeededRng;

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn preset(name: &str) -> Option<GenerationParameters> {
    let p = |base: &str, mode: HarmonyMode, theme: ThemeMode| {
        GenerationParameters::new(base).with_harmony(mode).with_theme(theme)
    };
    Some(match name {
        "default" | "studio" => p("#3366ff", HarmonyMode::Analogous, ThemeMode::Light),
        "midnight" => p("#5b4bdb", HarmonyMode::SplitComplementary, ThemeMode::Dark),
        "ember" => GenerationParameters {
            accent_strength: 130.0,
            ..p("#e8553d", HarmonyMode::Complementary, ThemeMode::Light)
        },
        "forest" => GenerationParameters {
            neutral_curve: 80.0,
            ..p("#2f7d4f", HarmonyMode::Analogous, ThemeMode::Dark)
        },
        "citrus" => GenerationParameters {
            pop_intensity: 140.0,
            ..p("#ffb000", HarmonyMode::Triadic, ThemeMode::Pop)
        },
        "slate" => GenerationParameters {
            harmony_intensity: 60.0,
            ..p("#5a6b7d", HarmonyMode::Monochromatic, ThemeMode::Light)
        },
        "neon" => p("#ff2bd6", HarmonyMode::Square, ThemeMode::Pop).with_apocalypse(120.0),
        "print-ink" => p("#1f4e79", HarmonyMode::Rectangle, ThemeMode::Light).with_print_mode(true),
        _ => return None,
    })
}

/// List all preset names.
#[must_use]
pub const fn preset_names() -> &'static [&'static str] {
    &[
        "default",
        "studio",
        "midnight",
        "ember",
        "forest",
        "citrus",
        "slate",
        "neon",
        "print-ink",
    ]
}

/// Preset names in a seeded order. Same seed, same order.
#[must_use]
pub fn shuffled_presets(seed: u32) -> Vec<&'static str> {
    let mut names = preset_names().to_vec();
    SeededRng::derive(seed, "presets").shuffle(&mut names);
    names
}

/// Random but reproducible parameters for a "surprise me" button.
#[must_use]
pub fn surprise(seed: u32) -> GenerationParameters {
    const THEMES: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Pop];
    let mut rng = SeededRng::derive(seed, "surprise");

    let base = hs_color::Color::hsl(
        rng.range_f64(0.0, 360.0),
        rng.range_f64(45.0, 95.0),
        rng.range_f64(38.0, 62.0),
    );
    let mode = *rng.pick(HarmonyMode::all());
    let theme = *rng.pick(&THEMES);

    GenerationParameters {
        harmony_intensity: rng.range_f64(60.0, 140.0).round(),
        accent_strength: rng.range_f64(60.0, 140.0).round(),
        neutral_curve: rng.range_f64(70.0, 130.0).round(),
        ..GenerationParameters::new(&base.to_hex())
            .with_harmony(mode)
            .with_theme(theme)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generate;
    use pretty_assertions::assert_eq;

    #[test]
    fn all_presets_resolve_and_generate() {
        for name in preset_names() {
            let params = preset(name).unwrap_or_else(|| panic!("preset '{name}' missing"));
            assert!(generate(&params).is_ok(), "preset '{name}' failed to generate");
        }
    }

    #[test]
    fn unknown_returns_none() {
        assert!(preset("nonexistent").is_none());
    }

    #[test]
    fn default_is_studio() {
        assert_eq!(preset("default"), preset("studio"));
    }

    #[test]
    fn print_ink_is_print_mode() {
        assert!(preset("print-ink").unwrap().print_mode);
    }

    #[test]
    fn shuffle_is_seeded_permutation() {
        let a = shuffled_presets(3);
        assert_eq!(a, shuffled_presets(3));

        let mut sorted = a.clone();
        sorted.sort_unstable();
        let mut expected = preset_names().to_vec();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffles_vary_with_seed() {
        let orders: Vec<Vec<&str>> = (0..8).map(shuffled_presets).collect();
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn surprise_is_reproducible() {
        assert_eq!(surprise(17), surprise(17));
        assert!(generate(&surprise(17)).is_ok());
        let distinct: Vec<String> = (0..6).map(|s| surprise(s).base_color).collect();
        assert!(distinct.windows(2).any(|w| w[0] != w[1]));
    }
}
