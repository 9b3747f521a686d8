//! Token synthesis: one seed color in, a complete token tree out.
//!
//! ```text
//! GenerationParameters
//!     │  validate, resolve HarmonySpec with sliders applied
//!     ▼
//! derive_palette:   hues → neutral ramp → brand → text → status
//!     │
//!     ▼
//! enforce_text:     heading/strong ≥ 7, body ≥ 4.5, muted ≥ 3.2 (4.5 in pop)
//! apply_lock:       optional dual-color tune of cta and body pairs
//!     │
//!     ▼
//! assemble:         foundation, brand, typography, … , aliases, legacy
//!     │
//!     ▼
//! print_safe:       optional clamp of every color leaf + flat `print` group
//! ```
//!
//! The contrast passes run on the flat palette before assembly so that
//! alias and legacy leaves mirror the corrected values.

use hs_color::{Color, Hsl, blend_hue, contrast_ratio, normalize_hue};
use serde::Serialize;

use crate::contrast::{Direction, auto_tune_contrast, ensure_contrast};
use crate::error::Result;
use crate::harmony::{HarmonySpec, create_harmony};
use crate::params::{GenerationParameters, ThemeMode};
use crate::tokens::{GroupBuilder, TokenLeaf, TokenTree, TokenValue};

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Names of the neutral ramp steps, lightest first.
pub const NEUTRAL_STEPS: [&str; 10] = [
    "50", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];

/// Neutral ramp lightness, indexed `[theme][apocalypse][step]`.
const NEUTRAL_RAMPS: [[[f64; 10]; 2]; 3] = [
    // light
    [
        [97.0, 94.0, 88.0, 80.0, 68.0, 55.0, 44.0, 34.0, 24.0, 14.0],
        [99.0, 96.0, 90.0, 78.0, 62.0, 48.0, 34.0, 22.0, 12.0, 5.0],
    ],
    // dark
    [
        [92.0, 86.0, 76.0, 64.0, 52.0, 42.0, 32.0, 22.0, 14.0, 8.0],
        [96.0, 88.0, 74.0, 58.0, 44.0, 32.0, 22.0, 13.0, 7.0, 3.0],
    ],
    // pop
    [
        [98.0, 95.0, 90.0, 82.0, 70.0, 57.0, 46.0, 36.0, 26.0, 16.0],
        [99.0, 97.0, 92.0, 82.0, 66.0, 50.0, 36.0, 24.0, 13.0, 6.0],
    ],
];

/// Fixed status hues: success, warning, error, info.
const STATUS_HUES: [(&str, f64); 4] = [
    ("success", 145.0),
    ("warning", 45.0),
    ("error", 0.0),
    ("info", 210.0),
];

/// Print-safe bounds.
const PRINT_MAX_SATURATION: f64 = 88.0;
const PRINT_MIN_LIGHTNESS: f64 = 8.0;
const PRINT_MAX_LIGHTNESS: f64 = 92.0;
const PRINT_MAX_STEPS: usize = 100;

/// Per-theme lightness and saturation targets.
struct Profile {
    ramp: usize,
    background: (f64, f64),
    surface: (f64, f64),
    surface_alt: (f64, f64),
    overlay: (f64, f64),
    heading_l: f64,
    body_l: f64,
    muted_l: f64,
    strong_l: f64,
    secondary_l: f64,
    accent_l: f64,
    cta_l: f64,
    status: (f64, f64),
    status_subtle_l: f64,
    neutral_s: f64,
    pivot: f64,
    /// Lightness shift for hover; active doubles it.
    hover_delta: f64,
    prefer: Direction,
}

const fn profile(theme: ThemeMode) -> Profile {
    match theme {
        ThemeMode::Light => Profile {
            ramp: 0,
            background: (30.0, 98.0),
            surface: (25.0, 95.0),
            surface_alt: (22.0, 91.0),
            overlay: (20.0, 12.0),
            heading_l: 12.0,
            body_l: 24.0,
            muted_l: 46.0,
            strong_l: 8.0,
            secondary_l: 45.0,
            accent_l: 48.0,
            cta_l: 46.0,
            status: (65.0, 40.0),
            status_subtle_l: 94.0,
            neutral_s: 8.0,
            pivot: 55.0,
            hover_delta: -8.0,
            prefer: Direction::Darken,
        },
        ThemeMode::Dark => Profile {
            ramp: 1,
            background: (22.0, 8.0),
            surface: (20.0, 12.0),
            surface_alt: (18.0, 17.0),
            overlay: (20.0, 3.0),
            heading_l: 94.0,
            body_l: 84.0,
            muted_l: 62.0,
            strong_l: 97.0,
            secondary_l: 66.0,
            accent_l: 64.0,
            cta_l: 60.0,
            status: (60.0, 62.0),
            status_subtle_l: 16.0,
            neutral_s: 10.0,
            pivot: 50.0,
            hover_delta: 8.0,
            prefer: Direction::Lighten,
        },
        ThemeMode::Pop => Profile {
            ramp: 2,
            background: (70.0, 97.0),
            surface: (60.0, 93.0),
            surface_alt: (55.0, 88.0),
            overlay: (30.0, 10.0),
            heading_l: 10.0,
            body_l: 18.0,
            muted_l: 38.0,
            strong_l: 6.0,
            secondary_l: 50.0,
            accent_l: 52.0,
            cta_l: 48.0,
            status: (80.0, 42.0),
            status_subtle_l: 92.0,
            neutral_s: 14.0,
            pivot: 52.0,
            hover_delta: -8.0,
            prefer: Direction::Darken,
        },
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One text/background pair the engine checked or tuned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// `"<fg path> / <bg path>"`.
    pub pair: String,
    pub target: f64,
    pub ratio: f64,
    pub met: bool,
    /// Single-color convergence gave up and substituted black or white.
    pub fallback: bool,
}

/// Result of [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub tokens: TokenTree,
    pub contrast: Vec<ContrastCheck>,
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct StatusColor {
    name: &'static str,
    base: Color,
    subtle: Color,
}

/// Every derived color, before it is laid out as tokens.
#[derive(Debug, Clone)]
struct Palette {
    background: Color,
    surface: Color,
    surface_alt: Color,
    surface_sunken: Color,
    overlay: Color,
    neutrals: [Color; 10],
    borders: [Color; 3],
    primary: Color,
    primary_hover: Color,
    primary_active: Color,
    on_primary: Color,
    secondary: Color,
    accent: Color,
    cta: Color,
    cta_text: Color,
    gradient_via: Color,
    heading: Color,
    body: Color,
    muted: Color,
    strong: Color,
    link: Color,
    status: [StatusColor; 4],
    harmony_hues: Vec<f64>,
    surface_hue: f64,
}

/// Generate the full token tree for `params`.
///
/// # Errors
///
/// Fails only on invalid input: a malformed base color or a non-finite
/// slider. Contrast shortfalls are reported in [`Generation::contrast`].
pub fn generate(params: &GenerationParameters) -> Result<Generation> {
    let base = params.validate()?;
    tracing::debug!(
        base = %base,
        mode = %params.harmony_mode,
        theme = %params.theme_mode,
        "generating tokens"
    );

    let spec = HarmonySpec::for_mode(params.harmony_mode)
        .scaled(params.harmony_intensity, params.accent_strength);
    let prof = profile(params.theme_mode);

    let mut palette = derive_palette(base, params, &spec, &prof);
    let mut checks = enforce_text(&mut palette, params.theme_mode, prof.prefer);
    if let Some(target) = params.contrast_lock {
        let locked = apply_lock(&mut palette, target.clamp(1.0, 21.0));
        remeasure(&mut checks, &palette);
        checks.extend(locked);
    }

    let mut tokens = assemble(&palette);
    if params.print_mode {
        tokens = print_safe(&tokens, base, params);
    }

    tracing::debug!(leaves = tokens.leaf_count(), checks = checks.len(), "token tree ready");
    Ok(Generation {
        tokens,
        contrast: checks,
    })
}

fn derive_palette(
    base: Color,
    params: &GenerationParameters,
    spec: &HarmonySpec,
    prof: &Profile,
) -> Palette {
    let base_hsl = base.to_hsl();
    let apocalypse = params.apocalypse_factor();
    let pop = if params.theme_mode == ThemeMode::Pop {
        (params.pop_intensity / 100.0).clamp(0.0, 2.0)
    } else {
        0.0
    };
    let tune = |hsl: Hsl| intensify(boost(hsl, pop), apocalypse);

    // Hues.
    let secondary_hue = normalize_hue(base_hsl.h + spec.secondary_hue_offset);
    let accent_hue = normalize_hue(base_hsl.h + spec.accent_hue_offset);
    let surface_hue = blend_hue(base_hsl.h, secondary_hue, spec.surface_mix_fraction);
    let background_hue = blend_hue(base_hsl.h, secondary_hue, spec.background_mix_fraction);

    // Foundation. Backgrounds never carry more saturation than the base.
    let tint = |hue: f64, (s, l): (f64, f64)| Color::hsl(hue, s.min(base_hsl.s), l);
    let background = tint(background_hue, prof.background);
    let surface = tint(surface_hue, prof.surface);
    let surface_alt = tint(surface_hue, prof.surface_alt);
    let surface_sunken = tint(
        surface_hue,
        (prof.surface.0, prof.surface.1 + prof.hover_delta / 2.0),
    );
    let overlay = tint(background_hue, prof.overlay);

    let neutrals = neutral_ramp(
        background_hue,
        prof,
        params.apocalypse,
        params.neutral_curve,
        base_hsl.s,
    );

    // Brand.
    let primary_hsl = tune(base_hsl);
    let primary = if apocalypse > 0.0 || pop > 0.0 {
        Color::from_hsl(primary_hsl)
    } else {
        base
    };
    let primary_hover = Color::from_hsl(primary_hsl.with_l(primary_hsl.l + prof.hover_delta));
    let primary_active =
        Color::from_hsl(primary_hsl.with_l(2.0_f64.mul_add(prof.hover_delta, primary_hsl.l)));
    let secondary = Color::from_hsl(tune(Hsl::new(
        secondary_hue,
        base_hsl.s * spec.secondary_sat_mult,
        prof.secondary_l,
    )));
    let accent = Color::from_hsl(tune(Hsl::new(
        accent_hue,
        base_hsl.s * spec.accent_sat_mult,
        prof.accent_l,
    )));
    let cta = Color::from_hsl(tune(Hsl::new(
        accent_hue,
        (base_hsl.s * spec.accent_sat_mult).max(60.0),
        prof.cta_l,
    )));
    let gradient_via = Color::from_hsl(tune(Hsl::new(
        blend_hue(base_hsl.h, secondary_hue, 0.5),
        f64::midpoint(primary_hsl.s, base_hsl.s * spec.secondary_sat_mult),
        f64::midpoint(primary_hsl.l, prof.secondary_l),
    )));

    // Text. Low saturation, tinted by the base hue.
    let text = |s: f64, l: f64| Color::hsl(base_hsl.h, s.min(base_hsl.s), l);
    let heading = text(20.0, prof.heading_l);
    let body = text(12.0, prof.body_l);
    let muted = text(10.0, prof.muted_l);
    let strong = text(25.0, prof.strong_l);
    let link = primary;

    let status = STATUS_HUES.map(|(name, hue)| StatusColor {
        name,
        base: Color::from_hsl(intensify(
            Hsl::new(hue, prof.status.0, prof.status.1),
            apocalypse,
        )),
        subtle: Color::hsl(hue, 40.0, prof.status_subtle_l),
    });

    // Borders: subtle, default, strong, stepping away from the background.
    let borders = if params.theme_mode.is_dark() {
        [neutrals[8], neutrals[7], neutrals[5]]
    } else {
        [neutrals[1], neutrals[2], neutrals[4]]
    };

    Palette {
        background,
        surface,
        surface_alt,
        surface_sunken,
        overlay,
        neutrals,
        borders,
        primary,
        primary_hover,
        primary_active,
        on_primary: readable_on(primary),
        secondary,
        accent,
        cta,
        cta_text: readable_on(cta),
        gradient_via,
        heading,
        body,
        muted,
        strong,
        link,
        status,
        harmony_hues: create_harmony(base_hsl.h, params.harmony_mode, false),
        surface_hue,
    }
}

/// Ten neutral steps for `theme`, remapped around the theme's pivot.
///
/// `curve` is a percent spread: 100 keeps the table, 50 halves every
/// step's distance from the pivot, 150 stretches it (factor clamped to
/// 0.5–1.5, result clamped to 2–98).
fn neutral_ramp(
    hue: f64,
    prof: &Profile,
    apocalypse: bool,
    curve: f64,
    base_s: f64,
) -> [Color; 10] {
    let table = NEUTRAL_RAMPS[prof.ramp][usize::from(apocalypse)];
    let factor = (curve / 100.0).clamp(0.5, 1.5);
    let s = prof.neutral_s.min(base_s);
    table.map(|l| {
        let l = (l - prof.pivot).mul_add(factor, prof.pivot).clamp(2.0, 98.0);
        Color::hsl(hue, s, l)
    })
}

/// Pop-theme saturation boost. `amount` 0 leaves the color alone.
fn boost(hsl: Hsl, amount: f64) -> Hsl {
    if amount <= 0.0 {
        return hsl;
    }
    hsl.with_s((100.0 - hsl.s).mul_add(0.35 * amount, hsl.s))
}

/// Apocalypse push: saturation toward 100, lightness away from 50.
fn intensify(hsl: Hsl, factor: f64) -> Hsl {
    if factor <= 0.0 {
        return hsl;
    }
    let s = (100.0 - hsl.s).mul_add(0.6 * factor, hsl.s);
    let toward = if hsl.l >= 50.0 { 100.0 - hsl.l } else { -hsl.l };
    let l = toward.mul_add(0.35 * factor, hsl.l).clamp(3.0, 97.0);
    Hsl::new(hsl.h, s, l)
}

/// Black or white, whichever reads better on `bg`.
fn readable_on(bg: Color) -> Color {
    if contrast_ratio(Color::BLACK, bg) >= contrast_ratio(Color::WHITE, bg) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

// ---------------------------------------------------------------------------
// Contrast passes
// ---------------------------------------------------------------------------

fn enforce_text(
    palette: &mut Palette,
    theme: ThemeMode,
    prefer: Direction,
) -> Vec<ContrastCheck> {
    let muted_target = if theme == ThemeMode::Pop { 4.5 } else { 3.2 };
    let bg = palette.background;
    let surface = palette.surface;

    let mut checks = Vec::with_capacity(5);
    let mut fix = |fg: &mut Color, against: Color, target: f64, pair: &str| {
        let result = ensure_contrast(*fg, against, target, prefer);
        *fg = result.color;
        checks.push(ContrastCheck {
            pair: pair.to_owned(),
            target,
            ratio: result.ratio,
            met: result.ratio >= target,
            fallback: result.fallback,
        });
    };

    fix(&mut palette.heading, bg, 7.0, "typography.heading / foundation.background");
    fix(&mut palette.strong, bg, 7.0, "typography.strong / foundation.background");
    fix(&mut palette.body, bg, 4.5, "typography.body / foundation.background");
    fix(&mut palette.muted, surface, muted_target, "typography.muted / foundation.surface");
    fix(&mut palette.link, bg, 4.5, "typography.link / foundation.background");
    checks
}

fn apply_lock(palette: &mut Palette, target: f64) -> [ContrastCheck; 2] {
    let cta = auto_tune_contrast(palette.cta_text, palette.cta, target);
    palette.cta_text = cta.fg;
    palette.cta = cta.bg;

    let body = auto_tune_contrast(palette.body, palette.background, target);
    palette.body = body.fg;
    palette.background = body.bg;

    tracing::debug!(
        target,
        cta = cta.ratio,
        body = body.ratio,
        "contrast lock applied"
    );
    [
        ContrastCheck {
            pair: "brand.ctaText / brand.cta".to_owned(),
            target,
            ratio: cta.ratio,
            met: cta.met,
            fallback: false,
        },
        ContrastCheck {
            pair: "typography.body / foundation.background".to_owned(),
            target,
            ratio: body.ratio,
            met: body.met,
            fallback: false,
        },
    ]
}

/// Refresh ratios of earlier checks whose colors the lock moved.
fn remeasure(checks: &mut [ContrastCheck], palette: &Palette) {
    for check in checks {
        let Some((fg, bg)) = palette.pair(&check.pair) else {
            continue;
        };
        check.ratio = contrast_ratio(fg, bg);
        check.met = check.ratio >= check.target;
    }
}

impl Palette {
    /// Colors of a `"<fg path> / <bg path>"` pair, for the text paths only.
    fn pair(&self, pair: &str) -> Option<(Color, Color)> {
        let (fg, bg) = pair.split_once(" / ")?;
        Some((self.text_color(fg)?, self.text_color(bg)?))
    }

    fn text_color(&self, path: &str) -> Option<Color> {
        Some(match path {
            "typography.heading" => self.heading,
            "typography.strong" => self.strong,
            "typography.body" => self.body,
            "typography.muted" => self.muted,
            "typography.link" => self.link,
            "foundation.background" => self.background,
            "foundation.surface" => self.surface,
            "brand.cta" => self.cta,
            "brand.ctaText" => self.cta_text,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn assemble(p: &Palette) -> TokenTree {
    let mut neutral = GroupBuilder::new();
    for (step, color) in NEUTRAL_STEPS.iter().zip(p.neutrals) {
        neutral = neutral.color(step, color);
    }
    let foundation = GroupBuilder::new()
        .color("background", p.background)
        .color("surface", p.surface)
        .color("surfaceAlt", p.surface_alt)
        .color("overlay", p.overlay)
        .group("neutral", neutral);

    let brand = GroupBuilder::new()
        .color("primary", p.primary)
        .color("primaryHover", p.primary_hover)
        .color("primaryActive", p.primary_active)
        .color("secondary", p.secondary)
        .color("accent", p.accent)
        .color("cta", p.cta)
        .color("ctaText", p.cta_text)
        .color("gradientStart", p.primary)
        .color("gradientVia", p.gradient_via)
        .color("gradientEnd", p.secondary);

    let typography = GroupBuilder::new()
        .color("heading", p.heading)
        .color("body", p.body)
        .color("muted", p.muted)
        .color("strong", p.strong)
        .color("link", p.link)
        .color("onPrimary", p.on_primary)
        .dimension("fontSizeBase", "16px")
        .dimension("fontSizeHeading", "32px")
        .text("lineHeight", "1.5");

    let text_palette = GroupBuilder::new()
        .color("default", p.body)
        .color("subtle", p.muted)
        .color("emphasis", p.strong)
        .color("inverse", p.background)
        .color("brand", p.link)
        .color("accent", p.accent);

    let [border_subtle, border_default, border_strong] = p.borders;
    let borders = GroupBuilder::new()
        .color("subtle", border_subtle)
        .color("default", border_default)
        .color("strong", border_strong)
        .color("focus", p.primary)
        .dimension("width", "1px")
        .group(
            "radius",
            GroupBuilder::new()
                .dimension("sm", "4px")
                .dimension("md", "8px")
                .dimension("lg", "16px")
                .dimension("full", "9999px"),
        );

    let surfaces = GroupBuilder::new()
        .color("base", p.surface)
        .color("raised", p.surface_alt)
        .color("sunken", p.surface_sunken)
        .color("inverse", p.strong);

    let cards = GroupBuilder::new()
        .color("background", p.surface)
        .color("header", p.surface_alt)
        .color("border", border_default)
        .color("title", p.heading)
        .text("shadow", "0 1px 3px rgba(0, 0, 0, 0.12)");

    let glass = GroupBuilder::new()
        .color("tint", Color::hsl(p.surface_hue, 30.0, p.surface.to_hsl().l))
        .color("border", border_subtle)
        .dimension("blur", "12px")
        .text("opacity", "0.72");

    let accent_l = p.accent.to_hsl().l;
    let accent_s = p.accent.to_hsl().s.max(40.0);
    let mut entity = GroupBuilder::new();
    let mut named = GroupBuilder::new();
    let mut seen: Vec<&str> = Vec::new();
    for (i, &hue) in p.harmony_hues.iter().enumerate() {
        let color = Color::hsl(hue, accent_s, accent_l);
        entity = entity.color(&(i + 1).to_string(), color);
        let name = hue_name(hue);
        let count = seen.iter().filter(|n| **n == name).count();
        seen.push(name);
        named = if count == 0 {
            named.color(name, color)
        } else {
            named.color(&format!("{name}-{}", count + 1), color)
        };
    }

    let mut status = GroupBuilder::new();
    for s in &p.status {
        status = status
            .color(s.name, s.base)
            .color(&format!("{}Subtle", s.name), s.subtle);
    }

    let aliases = GroupBuilder::new()
        .alias("background", p.background, "foundation.background")
        .alias("text", p.body, "typography.body")
        .alias("primary", p.primary, "brand.primary")
        .alias("accent", p.accent, "brand.accent")
        .alias("border", border_default, "borders.default");

    let legacy = [
        ("colorPrimary", p.primary, "brand.primary"),
        ("colorSecondary", p.secondary, "brand.secondary"),
        ("colorBackground", p.background, "foundation.background"),
        ("colorText", p.body, "typography.body"),
        ("colorAccent", p.accent, "brand.accent"),
    ]
    .into_iter()
    .fold(GroupBuilder::new(), |group, (name, color, target)| {
        group.leaf(
            name,
            TokenLeaf::new(TokenValue::Color(color))
                .with_meta("aliasOf", target)
                .with_meta("deprecated", "true"),
        )
    });

    TokenTree::builder()
        .group("foundation", foundation)
        .group("brand", brand)
        .group("typography", typography)
        .group("textPalette", text_palette)
        .group("borders", borders)
        .group("surfaces", surfaces)
        .group("cards", cards)
        .group("glass", glass)
        .group("entity", entity)
        .group("named", named)
        .group("status", status)
        .group("aliases", aliases)
        .group("legacy", legacy)
        .build()
}

/// Coarse English name for a hue, in 30° buckets centred on the primaries.
#[must_use]
pub fn hue_name(hue: f64) -> &'static str {
    const NAMES: [&str; 12] = [
        "red", "orange", "yellow", "lime", "green", "teal", "cyan", "azure", "blue", "violet",
        "magenta", "rose",
    ];
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = ((normalize_hue(hue + 15.0) / 30.0).floor() as usize).min(NAMES.len() - 1);
    NAMES[idx]
}

// ---------------------------------------------------------------------------
// Print pass
// ---------------------------------------------------------------------------

/// Clamp a color into the print-safe envelope. Colors already inside are
/// returned untouched so the pass does not add rounding drift.
///
/// The envelope is checked on the quantized result: 8-bit rounding can
/// push saturation a point or two past the cap, so saturation and
/// lightness step inward until the read-back fits.
#[must_use]
pub fn print_safe_color(color: Color) -> Color {
    let hsl = color.to_hsl();
    if within_print_envelope(hsl) {
        return color;
    }
    let mut s = hsl.s.min(PRINT_MAX_SATURATION);
    let mut l = hsl.l.clamp(PRINT_MIN_LIGHTNESS, PRINT_MAX_LIGHTNESS);
    for _ in 0..PRINT_MAX_STEPS {
        let candidate = Color::from_hsl(Hsl::new(hsl.h, s, l));
        let back = candidate.to_hsl();
        if within_print_envelope(back) {
            return candidate;
        }
        if back.s > PRINT_MAX_SATURATION {
            s = (s - 1.0).max(0.0);
        }
        if back.l < PRINT_MIN_LIGHTNESS {
            l += 1.0;
        } else if back.l > PRINT_MAX_LIGHTNESS {
            l -= 1.0;
        }
        l = l.clamp(PRINT_MIN_LIGHTNESS, PRINT_MAX_LIGHTNESS);
    }
    // A gray at a whole-number lightness always reads back inside.
    Color::from_hsl(Hsl::new(hsl.h, 0.0, l.round()))
}

fn within_print_envelope(hsl: Hsl) -> bool {
    hsl.s <= PRINT_MAX_SATURATION
        && (PRINT_MIN_LIGHTNESS..=PRINT_MAX_LIGHTNESS).contains(&hsl.l)
}

fn print_safe(tokens: &TokenTree, base: Color, params: &GenerationParameters) -> TokenTree {
    let mapped = tokens.map_colors(print_safe_color);
    let key = |path: &str| mapped.color(path).unwrap_or(Color::BLACK);

    let print = GroupBuilder::new()
        .color("primary", key("brand.primary"))
        .color("secondary", key("brand.secondary"))
        .color("accent", key("brand.accent"))
        .color("background", key("foundation.background"))
        .color("text", key("typography.body"))
        .text("paper", "uncoated")
        .text("ink", "process")
        .text("foil", "none")
        .dimension("bleed", "3mm")
        .dimension("safeMargin", "5mm")
        .text("sourceBaseColor", &base.to_hex())
        .text("sourceHarmonyMode", params.harmony_mode.name());

    tracing::debug!("print-safe pass applied");
    mapped.with_group("print", print)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
