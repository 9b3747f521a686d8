// SPDX-License-Identifier: MIT
//
// Input documents for the CLI.
//
// Every command that takes a file accepts TOML or JSON, picked by the
// file extension (`.toml`, `.json`). Anything else is tried as JSON
// first, then TOML, so piping through a temp file without an extension
// still works.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hs_tokens::{MergeSettings, ProjectSection};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Recognised document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse `text` as `T` in the given format, or sniff it when `None`.
pub fn parse<T: DeserializeOwned>(text: &str, format: Option<Format>) -> Result<T> {
    match format {
        Some(Format::Json) => serde_json::from_str(text).context("invalid JSON"),
        Some(Format::Toml) => toml::from_str(text).context("invalid TOML"),
        None => match serde_json::from_str(text) {
            Ok(value) => Ok(value),
            Err(json) => match toml::from_str(text) {
                Ok(value) => Ok(value),
                Err(toml) => bail!("neither JSON ({json}) nor TOML ({toml})"),
            },
        },
    }
}

/// Read and parse a document from disk.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&text, Format::from_path(path)).with_context(|| format!("parsing {}", path.display()))
}

/// The `merge` command's input: project sections plus optional settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeInput {
    pub sections: Vec<ProjectSection>,
    pub settings: MergeSettings,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hs_tokens::{GenerationParameters, HarmonyMode, ThemeMode};
    use pretty_assertions::assert_eq;

    // ── format detection ─────────────────────────────────────────────

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("b.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.yaml")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    // ── parameters ───────────────────────────────────────────────────

    #[test]
    fn toml_parameters_fill_defaults() {
        let params: GenerationParameters = parse(
            r##"
baseColor = "#e8553d"
harmonyMode = "split-complementary"
themeMode = "dark"
contrastLock = 7.0
"##,
            Some(Format::Toml),
        )
        .unwrap();
        assert_eq!(params.base_color, "#e8553d");
        assert_eq!(params.harmony_mode, HarmonyMode::SplitComplementary);
        assert_eq!(params.theme_mode, ThemeMode::Dark);
        assert_eq!(params.contrast_lock, Some(7.0));
        assert!((params.accent_strength - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sniffing_accepts_both_formats() {
        let a: GenerationParameters = parse(r##"{"baseColor":"#00ff00"}"##, None).unwrap();
        let b: GenerationParameters = parse(r##"baseColor = "#00ff00""##, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse::<GenerationParameters>("{{ nope", None).unwrap_err();
        assert!(err.to_string().contains("neither JSON"));
    }

    // ── merge input ──────────────────────────────────────────────────

    #[test]
    fn merge_input_from_toml() {
        let input: MergeInput = parse(
            r##"
[settings]
maxColors = 12

[[sections]]
label = "Brand"
baseHex = "#3366ff"
colors = [{ name = "Sky", hex = "#66ccff" }]
"##,
            Some(Format::Toml),
        )
        .unwrap();
        assert_eq!(input.sections.len(), 1);
        assert_eq!(input.sections[0].base_hex.as_deref(), Some("#3366ff"));
        assert_eq!(input.settings.max_colors, 12);
        assert_eq!(input.settings.neutral_cap, MergeSettings::default().neutral_cap);
    }
}
