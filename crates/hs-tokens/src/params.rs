//! Generation parameters — the single input record of the token engine.
//!
//! Sliders are percentages where 100 means "as designed". Ranges are
//! enforced where they are used (each mode clamps to its own safe range),
//! so this record only has to reject values no clamp can rescue.

use std::fmt;

use hs_color::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::harmony::HarmonyMode;

/// Overall light/dark character of the generated theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Light, saturated, high-energy.
    Pop,
}

impl ThemeMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Pop => "pop",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "pop" => Some(Self::Pop),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything one generation call needs. Immutable; build a new one to
/// change anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationParameters {
    pub base_color: String,
    pub harmony_mode: HarmonyMode,
    pub theme_mode: ThemeMode,
    /// Push saturation and lightness toward extremes.
    pub apocalypse: bool,
    /// Apocalypse strength, percent (factor clamped to 0.2–1.5).
    pub apocalypse_intensity: f64,
    pub harmony_intensity: f64,
    /// Neutral ramp spread around its pivot, percent.
    pub neutral_curve: f64,
    pub accent_strength: f64,
    /// Extra saturation in `pop` theme mode, percent.
    pub pop_intensity: f64,
    pub print_mode: bool,
    /// Optional explicit contrast target (clamped to 1–21).
    pub contrast_lock: Option<f64>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            base_color: "#3366ff".to_owned(),
            harmony_mode: HarmonyMode::Analogous,
            theme_mode: ThemeMode::Light,
            apocalypse: false,
            apocalypse_intensity: 100.0,
            harmony_intensity: 100.0,
            neutral_curve: 100.0,
            accent_strength: 100.0,
            pop_intensity: 100.0,
            print_mode: false,
            contrast_lock: None,
        }
    }
}

impl GenerationParameters {
    /// Defaults around the given base color.
    #[must_use]
    pub fn new(base_color: &str) -> Self {
        Self {
            base_color: base_color.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_harmony(self, harmony_mode: HarmonyMode) -> Self {
        Self {
            harmony_mode,
            ..self
        }
    }

    #[must_use]
    pub fn with_theme(self, theme_mode: ThemeMode) -> Self {
        Self { theme_mode, ..self }
    }

    #[must_use]
    pub fn with_apocalypse(self, intensity: f64) -> Self {
        Self {
            apocalypse: true,
            apocalypse_intensity: intensity,
            ..self
        }
    }

    #[must_use]
    pub fn with_print_mode(self, print_mode: bool) -> Self {
        Self { print_mode, ..self }
    }

    #[must_use]
    pub fn with_contrast_lock(self, target: Option<f64>) -> Self {
        Self {
            contrast_lock: target,
            ..self
        }
    }

    /// Parse the base color and reject non-finite sliders.
    ///
    /// # Errors
    ///
    /// [`Error::Color`] for a malformed base color,
    /// [`Error::InvalidParameter`] for NaN or infinite slider values.
    pub fn validate(&self) -> Result<Color> {
        let sliders = [
            ("apocalypseIntensity", self.apocalypse_intensity),
            ("harmonyIntensity", self.harmony_intensity),
            ("neutralCurve", self.neutral_curve),
            ("accentStrength", self.accent_strength),
            ("popIntensity", self.pop_intensity),
            ("contrastLock", self.contrast_lock.unwrap_or(1.0)),
        ];
        for (name, value) in sliders {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name,
                    reason: "must be a finite number",
                });
            }
        }
        Ok(Color::hex(&self.base_color)?)
    }

    /// Apocalypse factor in [0.2, 1.5], or 0 when apocalypse is off.
    #[must_use]
    pub fn apocalypse_factor(&self) -> f64 {
        if self.apocalypse {
            (self.apocalypse_intensity / 100.0).clamp(0.2, 1.5)
        } else {
            0.0
        }
    }
}
