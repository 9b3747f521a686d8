// SPDX-License-Identifier: MIT
//
// huesmith — design tokens from a single seed color.
//
// This is the command-line front end that wires the two crates together:
//
//   hs-color  → hex/HSL/Oklab conversions, WCAG contrast
//   hs-tokens → harmony, token synthesis, mood clusters, project merge
//
// Every command reads its inputs from flags, environment or a TOML/JSON
// file, and writes one machine-readable document to stdout:
//
//   generate    → token tree (JSON), optionally with the contrast report
//   mood        → mood cluster (JSON)
//   regenerate  → mood cluster re-rolled under a new seed, locks kept
//   merge       → merged project swatches (JSON) or a .soc archive (XML)
//   presets     → preset names, optionally in a seeded order
//   contrast    → WCAG ratio between two colors
//
// Logs go to stderr, filtered by RUST_LOG (default `warn`).

mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use hs_color::{Color, contrast_ratio};
use hs_tokens::{
    ClusterRequest, ClusterType, GenerationParameters, HarmonyMode, MoodCluster, SocEntry,
    SocOptions, ThemeMode, generate, generate_cluster, generate_soc, merge_project_colors,
    preset, preset_names, shuffled_presets, surprise,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::MergeInput;

// ─── Command line ───────────────────────────────────────────────────────────

/// Generate design tokens, mood clusters and swatch archives from a seed color.
#[derive(Parser, Debug)]
#[command(name = "huesmith", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a token tree from generation parameters
    Generate(GenerateArgs),
    /// Build a seeded mood cluster
    Mood(MoodArgs),
    /// Re-roll an existing mood cluster, keeping locked slots
    Regenerate(RegenerateArgs),
    /// Merge project sections into one swatch list
    Merge(MergeArgs),
    /// List the built-in presets
    Presets(PresetsArgs),
    /// Print the WCAG contrast ratio of two colors
    Contrast(ContrastArgs),
}

/// Flags for `generate`. Each one overrides the matching field from
/// `--config` or `--preset`.
#[derive(Args, Debug)]
struct GenerateArgs {
    /// Parameter file (TOML or JSON)
    #[arg(short, long, value_name = "FILE", env = "HUESMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Start from a named preset
    #[arg(short, long, value_name = "NAME", conflicts_with = "config")]
    preset: Option<String>,

    /// Start from seeded random parameters
    #[arg(long, value_name = "SEED", conflicts_with_all = ["config", "preset"])]
    surprise: Option<u32>,

    /// Base color as hex
    #[arg(short, long, value_name = "HEX", env = "HUESMITH_BASE")]
    base: Option<String>,

    /// Harmony mode (mono, complementary, analogous, triadic, split, rectangle, square)
    #[arg(long, value_name = "MODE", env = "HUESMITH_HARMONY")]
    harmony: Option<String>,

    /// Theme mode (light, dark, pop)
    #[arg(short, long, value_name = "MODE", env = "HUESMITH_THEME")]
    theme: Option<String>,

    /// Enable apocalypse at this intensity (percent)
    #[arg(long, value_name = "PERCENT", env = "HUESMITH_APOCALYPSE")]
    apocalypse: Option<f64>,

    #[arg(long, value_name = "PERCENT", env = "HUESMITH_HARMONY_INTENSITY")]
    harmony_intensity: Option<f64>,

    #[arg(long, value_name = "PERCENT", env = "HUESMITH_ACCENT_STRENGTH")]
    accent_strength: Option<f64>,

    #[arg(long, value_name = "PERCENT", env = "HUESMITH_NEUTRAL_CURVE")]
    neutral_curve: Option<f64>,

    #[arg(long, value_name = "PERCENT", env = "HUESMITH_POP_INTENSITY")]
    pop_intensity: Option<f64>,

    /// Clamp colors into a printable range and add the print group
    #[arg(long, env = "HUESMITH_PRINT")]
    print: bool,

    /// Contrast ratio to enforce on the CTA and body text pairs
    #[arg(long, value_name = "RATIO", env = "HUESMITH_CONTRAST_LOCK")]
    contrast_lock: Option<f64>,

    /// Include the contrast report alongside the tokens
    #[arg(long)]
    report: bool,
}

#[derive(Args, Debug)]
struct MoodArgs {
    /// Cluster type (smoky, bright, deep, warm-drift, cool-drift)
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "bright")]
    cluster_type: String,

    #[arg(short, long, default_value_t = 1, env = "HUESMITH_SEED")]
    seed: u32,

    #[arg(short, long, value_name = "HEX", default_value = "#3366ff", env = "HUESMITH_BASE")]
    base: String,

    /// Color that must appear in the cluster
    #[arg(short, long, value_name = "HEX", default_value = "#ff6633")]
    required: String,
}

#[derive(Args, Debug)]
struct RegenerateArgs {
    /// Cluster document previously written by `mood` or `regenerate`
    #[arg(value_name = "FILE")]
    cluster: PathBuf,

    #[arg(short, long, env = "HUESMITH_SEED")]
    seed: u32,

    /// Lock these slot ids before re-rolling
    #[arg(short, long, value_name = "SLOT")]
    lock: Vec<String>,

    /// Unlock these slot ids before re-rolling
    #[arg(short, long, value_name = "SLOT")]
    unlock: Vec<String>,
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Project document: `sections` plus optional `settings`
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write a .soc swatch archive instead of JSON
    #[arg(long)]
    soc: bool,

    /// Tidy swatch names in the archive
    #[arg(long, requires = "soc")]
    sanitize: bool,

    #[arg(long, value_name = "N")]
    max_colors: Option<usize>,

    #[arg(long, value_name = "N")]
    neutral_cap: Option<usize>,

    /// Perceptual distance under which two swatches merge
    #[arg(long, value_name = "DISTANCE")]
    threshold: Option<f64>,
}

#[derive(Args, Debug)]
struct PresetsArgs {
    /// Print names in a seeded order
    #[arg(long, value_name = "SEED")]
    shuffle: Option<u32>,

    /// Print each preset's parameters instead of just its name
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct ContrastArgs {
    #[arg(value_name = "FOREGROUND")]
    fg: String,

    #[arg(value_name = "BACKGROUND")]
    bg: String,
}

// ─── Commands ───────────────────────────────────────────────────────────────

impl GenerateArgs {
    /// Resolve the starting parameters, then apply flag overrides.
    fn parameters(&self) -> Result<GenerationParameters> {
        let mut params = if let Some(path) = &self.config {
            config::load(path)?
        } else if let Some(name) = &self.preset {
            preset(name).ok_or_else(|| {
                anyhow!("unknown preset '{name}' (try: {})", preset_names().join(", "))
            })?
        } else if let Some(seed) = self.surprise {
            surprise(seed)
        } else {
            GenerationParameters::default()
        };

        if let Some(base) = &self.base {
            params.base_color.clone_from(base);
        }
        if let Some(mode) = &self.harmony {
            params.harmony_mode = HarmonyMode::from_name(mode);
        }
        if let Some(theme) = &self.theme {
            params.theme_mode = ThemeMode::from_name(theme)
                .ok_or_else(|| anyhow!("unknown theme mode '{theme}'"))?;
        }
        if let Some(intensity) = self.apocalypse {
            params = params.with_apocalypse(intensity);
        }
        let sliders = [
            (self.harmony_intensity, &mut params.harmony_intensity),
            (self.accent_strength, &mut params.accent_strength),
            (self.neutral_curve, &mut params.neutral_curve),
            (self.pop_intensity, &mut params.pop_intensity),
        ];
        for (flag, field) in sliders {
            if let Some(value) = flag {
                *field = value;
            }
        }
        if self.print {
            params.print_mode = true;
        }
        if self.contrast_lock.is_some() {
            params.contrast_lock = self.contrast_lock;
        }
        Ok(params)
    }

    fn run(&self, out: &mut Output) -> Result<()> {
        let params = self.parameters()?;
        tracing::debug!(
            base = %params.base_color,
            mode = %params.harmony_mode,
            theme = %params.theme_mode,
            "generating"
        );
        let generation = generate(&params).context("token generation failed")?;

        let unmet = generation.contrast.iter().filter(|c| !c.met).count();
        if unmet > 0 {
            tracing::warn!(unmet, "some contrast targets could not be met");
        }

        if self.report {
            out.json(&generation)
        } else {
            out.json(&generation.tokens)
        }
    }
}

impl MoodArgs {
    fn run(&self, out: &mut Output) -> Result<()> {
        let cluster_type = ClusterType::from_name(&self.cluster_type)
            .ok_or_else(|| anyhow!("unknown cluster type '{}'", self.cluster_type))?;
        let request = ClusterRequest {
            base_color: self.base.clone(),
            required_color: self.required.clone(),
            cluster_type,
            seed: self.seed,
        };
        let cluster = generate_cluster(&request).context("mood cluster generation failed")?;
        out.json(&cluster)
    }
}

impl RegenerateArgs {
    fn run(&self, out: &mut Output) -> Result<()> {
        let mut cluster: MoodCluster = config::load(&self.cluster)?;
        for (ids, locked) in [(&self.lock, true), (&self.unlock, false)] {
            for id in ids {
                cluster = cluster
                    .with_slot_locked(id, locked)
                    .with_context(|| format!("cannot change lock on slot '{id}'"))?;
            }
        }
        out.json(&cluster.regenerate(self.seed))
    }
}

impl MergeArgs {
    fn run(&self, out: &mut Output) -> Result<()> {
        let MergeInput {
            sections,
            mut settings,
        } = config::load(&self.input)?;
        if let Some(n) = self.max_colors {
            settings.max_colors = n;
        }
        if let Some(n) = self.neutral_cap {
            settings.neutral_cap = n;
        }
        if let Some(t) = self.threshold {
            if !t.is_finite() || t < 0.0 {
                bail!("threshold must be a non-negative number, got {t}");
            }
            settings.near_dup_threshold = t;
        }

        let merged = merge_project_colors(&sections, &settings);
        tracing::debug!(sections = sections.len(), kept = merged.len(), "merged project colors");

        if self.soc {
            let entries: Vec<SocEntry> = merged.iter().map(SocEntry::from).collect();
            let xml = generate_soc(
                &entries,
                SocOptions {
                    sanitize_names: self.sanitize,
                },
            )?;
            out.raw(&xml)
        } else {
            out.json(&merged)
        }
    }
}

impl PresetsArgs {
    fn run(&self, out: &mut Output) -> Result<()> {
        let names = self
            .shuffle
            .map_or_else(|| preset_names().to_vec(), shuffled_presets);
        if self.verbose {
            let listing: Vec<(&str, Option<GenerationParameters>)> =
                names.into_iter().map(|name| (name, preset(name))).collect();
            out.json(&listing)
        } else {
            out.raw(&(names.join("\n") + "\n"))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContrastReport {
    foreground: Color,
    background: Color,
    ratio: f64,
    aa: bool,
    aa_large: bool,
    aaa: bool,
}

impl ContrastArgs {
    fn run(&self, out: &mut Output) -> Result<()> {
        let fg = Color::hex(&self.fg).with_context(|| format!("foreground '{}'", self.fg))?;
        let bg = Color::hex(&self.bg).with_context(|| format!("background '{}'", self.bg))?;
        let ratio = contrast_ratio(fg, bg);
        out.json(&ContrastReport {
            foreground: fg,
            background: bg,
            ratio: (ratio * 100.0).round() / 100.0,
            aa: ratio >= 4.5,
            aa_large: ratio >= 3.0,
            aaa: ratio >= 7.0,
        })
    }
}

// ─── Output ─────────────────────────────────────────────────────────────────

/// Stdout writer honouring `--compact`.
struct Output {
    sink: io::StdoutLock<'static>,
    compact: bool,
}

impl Output {
    fn new(compact: bool) -> Self {
        Self {
            sink: io::stdout().lock(),
            compact,
        }
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let text = if self.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        }
        .context("serializing output")?;
        self.raw(&(text + "\n"))
    }

    fn raw(&mut self, text: &str) -> Result<()> {
        self.sink
            .write_all(text.as_bytes())
            .and_then(|()| self.sink.flush())
            .context("writing to stdout")
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut out = Output::new(cli.compact);
    match &cli.command {
        Command::Generate(args) => args.run(&mut out),
        Command::Mood(args) => args.run(&mut out),
        Command::Regenerate(args) => args.run(&mut out),
        Command::Merge(args) => args.run(&mut out),
        Command::Presets(args) => args.run(&mut out),
        Command::Contrast(args) => args.run(&mut out),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
