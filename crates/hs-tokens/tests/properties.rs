//! Cross-module properties of the token engine, exercised through the
//! public API only.

use hs_color::{Color, contrast_ratio, hex_to_hsl, hsl_to_hex, perceptual_distance};
use hs_tokens::{
    ClusterRequest, ClusterType, Direction, GenerationParameters, HarmonyMode, MergeSettings,
    NamedColor, ProjectSection, SocEntry, SocOptions, ThemeMode, create_harmony, ensure_contrast,
    generate, generate_cluster, generate_soc, merge_project_colors,
};
use pretty_assertions::assert_eq;

// ── color space ─────────────────────────────────────────────────────

#[test]
fn hsl_round_trip_within_one_unit() {
    for h in (0..360).step_by(5) {
        for s in [70.0, 85.0, 100.0] {
            for l in [40.0, 50.0, 60.0] {
                let h = f64::from(h);
                let back = hex_to_hsl(&hsl_to_hex(h, s, l).unwrap()).unwrap();
                let dh = (back.h - h).abs().min(360.0 - (back.h - h).abs());
                assert!(dh <= 1.0, "h {h} -> {}", back.h);
                assert!((back.s - s).abs() <= 1.0, "s {s} -> {}", back.s);
                assert!((back.l - l).abs() <= 1.0, "l {l} -> {}", back.l);
            }
        }
    }
}

// ── harmony ─────────────────────────────────────────────────────────

#[test]
fn reverse_is_exact_reverse() {
    for &mode in HarmonyMode::all() {
        for base in [0.0, 45.0, 200.0, 359.0] {
            let mut forward = create_harmony(base, mode, false);
            forward.reverse();
            assert_eq!(forward, create_harmony(base, mode, true), "{mode} @ {base}");
        }
    }
}

// ── contrast ────────────────────────────────────────────────────────

#[test]
fn ensure_contrast_meets_target_or_best_fallback() {
    let samples = ["#ffffff", "#000000", "#3366ff", "#ff6633", "#808080", "#1e1e2e", "#f5f5dc"];
    for bg in samples {
        for fg in samples {
            let (fg, bg) = (Color::hex(fg).unwrap(), Color::hex(bg).unwrap());
            for target in [3.0, 4.5, 7.0, 12.0] {
                let fix = ensure_contrast(fg, bg, target, Direction::Lighten);
                if fix.fallback {
                    let best = contrast_ratio(Color::BLACK, bg).max(contrast_ratio(Color::WHITE, bg));
                    assert!((fix.ratio - best).abs() < 1e-12);
                } else {
                    assert!(fix.ratio >= target);
                }
            }
        }
    }
}

// ── token engine ────────────────────────────────────────────────────

#[test]
fn generation_is_byte_identical() {
    for &mode in HarmonyMode::all() {
        for theme in [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Pop] {
            let params = GenerationParameters::new("#3366ff")
                .with_harmony(mode)
                .with_theme(theme)
                .with_contrast_lock(Some(6.0));
            let a = serde_json::to_string(&generate(&params).unwrap()).unwrap();
            let b = serde_json::to_string(&generate(&params).unwrap()).unwrap();
            assert_eq!(a, b);
        }
    }
}

#[test]
fn secondary_differs_across_modes() {
    let secondary = |mode| {
        let params = GenerationParameters::new("#3366ff").with_harmony(mode);
        generate(&params).unwrap().tokens.color("brand.secondary").unwrap()
    };
    let mono = secondary(HarmonyMode::Monochromatic);
    let analogous = secondary(HarmonyMode::Analogous);
    let complementary = secondary(HarmonyMode::Complementary);
    assert_ne!(mono, analogous);
    assert_ne!(mono, complementary);
    assert_ne!(analogous, complementary);
}

#[test]
fn color_leaves_serialise_as_typed_hex() {
    let generation = generate(&GenerationParameters::default()).unwrap();
    let json = serde_json::to_value(&generation.tokens).unwrap();
    let primary = &json["brand"]["primary"];
    assert_eq!(primary["type"], "color");
    assert_eq!(primary["value"], "#3366ff");
    assert!(primary.get("metadata").is_none());
}

// ── mood clusters ───────────────────────────────────────────────────

#[test]
fn mood_regeneration_respects_seed_and_locks() {
    let request = ClusterRequest {
        cluster_type: ClusterType::Deep,
        seed: 21,
        ..ClusterRequest::default()
    };
    let cluster = generate_cluster(&request).unwrap();
    assert_eq!(cluster.regenerate(21).slots, cluster.slots);

    let kept = cluster.slot("support-1").unwrap().color;
    let locked = cluster.with_slot_locked("support-1", true).unwrap();
    let next = locked.regenerate(22);
    assert_eq!(next.slot("support-1").unwrap().color, kept);
}

#[test]
fn mood_hue_rule_holds_under_default_limits() {
    let pairs = [
        ("#3366ff", "#ff6633"),
        ("#2f7d4f", "#e8c547"),
        ("#777777", "#aa00ff"),
        ("#c0392b", "#16a085"),
        ("#101820", "#fee715"),
    ];
    for &ty in ClusterType::all() {
        for seed in 0..60 {
            for (base, required) in pairs {
                let request = ClusterRequest {
                    base_color: base.into(),
                    required_color: required.into(),
                    cluster_type: ty,
                    seed,
                };
                let cluster = generate_cluster(&request).unwrap();
                assert_eq!(
                    cluster.hue_conflicts(24.0),
                    Vec::<(&str, &str)>::new(),
                    "{ty}/{seed}/{base}/{required}"
                );
                assert!(cluster.slots.iter().all(|s| !s.relaxed), "{ty}/{seed}/{base}/{required}");
            }
        }
    }
}

// ── project merge ───────────────────────────────────────────────────

fn swatches(label: &str, base: Option<&str>, hexes: &[&str]) -> ProjectSection {
    ProjectSection {
        label: label.into(),
        base_hex: base.map(Into::into),
        tokens: None,
        colors: Some(
            hexes
                .iter()
                .enumerate()
                .map(|(i, hex)| NamedColor {
                    name: format!("{label} {i}"),
                    hex: (*hex).into(),
                })
                .collect(),
        ),
    }
}

#[test]
fn merge_respects_caps_and_distance() {
    let mut hexes: Vec<String> = (0..90)
        .map(|i| Color::hsl(f64::from(i) * 4.0, 70.0, 50.0).to_hex())
        .collect();
    hexes.extend((0..20).map(|i| Color::hsl(0.0, 0.0, f64::from(i) * 5.0).to_hex()));
    let refs: Vec<&str> = hexes.iter().map(String::as_str).collect();
    let sections = [swatches("a", Some("#3366ff"), &refs), swatches("b", None, &refs)];

    let settings = MergeSettings {
        neutral_cap: 5,
        max_colors: 30,
        ..MergeSettings::default()
    };
    let merged = merge_project_colors(&sections, &settings);
    assert!(merged.len() <= 30);
    assert!(merged.iter().filter(|e| e.color.is_neutral()).count() <= 5);

    for (i, a) in merged.iter().enumerate() {
        for b in &merged[i + 1..] {
            let close = perceptual_distance(a.color, b.color) < settings.near_dup_threshold;
            assert!(!close || a.is_anchor || b.is_anchor, "{a:?} ~ {b:?}");
        }
    }
}

#[test]
fn merged_colors_export_to_soc() {
    let sections = [swatches("Brand & Co", Some("#3366ff"), &["#3366ff", "#ff6633"])];
    let merged = merge_project_colors(&sections, &MergeSettings::default());
    let entries: Vec<SocEntry> = merged.iter().map(SocEntry::from).collect();
    let xml = generate_soc(&entries, SocOptions::default()).unwrap();
    assert_eq!(xml.matches("<draw:color ").count(), 2);
    assert!(xml.contains(r##"draw:color="#3366ff""##));
}

// ── swatch archive ──────────────────────────────────────────────────

#[test]
fn soc_escapes_names() {
    let xml = generate_soc(
        &[SocEntry {
            name: "Alpha & Beta <Gamma>".into(),
            hex: "#ffffff".into(),
        }],
        SocOptions {
            sanitize_names: false,
        },
    )
    .unwrap();
    assert!(xml.contains(r#"draw:name="Alpha &amp; Beta &lt;Gamma&gt;""#));
}
