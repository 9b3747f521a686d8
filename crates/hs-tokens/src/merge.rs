//! Project-wide color merging for swatch export.
//!
//! Sections of a project each contribute role tokens and/or ad hoc named
//! colors. Merging flattens them into one deduplicated, capped and
//! deterministically ordered list:
//!
//! 1. collect entries, tagging role/non-role and anchor/non-anchor
//!    (anchor = the section's own base color);
//! 2. one accumulating pass drops perceptual near-duplicates, except that
//!    a protected anchor displaces a non-anchor it collides with;
//! 3. neutrals beyond the cap are dropped, role neutrals kept first;
//! 4. truncate to `max_colors`, then stable-sort role → anchor → hue →
//!    luminance (light first).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hs_color::{Color, perceptual_distance, relative_luminance};
use serde::{Deserialize, Serialize};

/// An ad hoc swatch inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub hex: String,
}

/// One section of a project as persisted by the caller.
///
/// Every field is optional; a section with nothing in it contributes
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSection {
    pub label: String,
    pub base_hex: Option<String>,
    /// Role name → hex.
    pub tokens: Option<BTreeMap<String, String>>,
    pub colors: Option<Vec<NamedColor>>,
}

/// Merge tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeSettings {
    /// Perceptual distance below which two colors count as one.
    pub near_dup_threshold: f64,
    pub neutral_cap: usize,
    pub max_colors: usize,
    /// Anchors survive deduplication even against each other.
    pub anchors_always_keep: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            near_dup_threshold: 2.0,
            neutral_cap: 8,
            max_colors: 40,
            anchors_always_keep: true,
        }
    }
}

/// A merged swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectColorEntry {
    pub name: String,
    #[serde(rename = "hex")]
    pub color: Color,
    pub is_role: bool,
    pub is_anchor: bool,
    pub section_label: String,
}

impl ProjectColorEntry {
    const fn protected(&self, settings: &MergeSettings) -> bool {
        self.is_anchor && settings.anchors_always_keep
    }
}

/// Merge every section into one swatch list.
///
/// Never fails: malformed hex values are logged and skipped.
#[must_use]
pub fn merge_project_colors(
    sections: &[ProjectSection],
    settings: &MergeSettings,
) -> Vec<ProjectColorEntry> {
    let candidates = collect(sections);
    let total = candidates.len();

    let accepted = dedup(candidates, settings);
    let deduped = accepted.len();

    let mut merged = cap_neutrals(accepted, settings.neutral_cap);
    merged.truncate(settings.max_colors);
    merged.sort_by(order);

    tracing::debug!(
        sections = sections.len(),
        candidates = total,
        deduped,
        kept = merged.len(),
        "project colors merged"
    );
    merged
}

fn collect(sections: &[ProjectSection]) -> Vec<ProjectColorEntry> {
    let mut out = Vec::new();
    for section in sections {
        let anchor = section
            .base_hex
            .as_deref()
            .and_then(|hex| parse(&section.label, "base", hex));

        let roles = section.tokens.iter().flatten().map(|(n, h)| (n, h, true));
        let adhoc = section
            .colors
            .iter()
            .flatten()
            .map(|c| (&c.name, &c.hex, false));

        for (name, hex, is_role) in roles.chain(adhoc) {
            let Some(color) = parse(&section.label, name, hex) else {
                continue;
            };
            out.push(ProjectColorEntry {
                name: name.clone(),
                color,
                is_role,
                is_anchor: anchor == Some(color),
                section_label: section.label.clone(),
            });
        }
    }
    out
}

fn parse(section: &str, name: &str, hex: &str) -> Option<Color> {
    match Color::hex(hex) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!(section, name, %err, "skipping malformed project color");
            None
        }
    }
}

fn dedup(candidates: Vec<ProjectColorEntry>, settings: &MergeSettings) -> Vec<ProjectColorEntry> {
    let mut accepted: Vec<ProjectColorEntry> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let near = |e: &ProjectColorEntry| {
            perceptual_distance(e.color, candidate.color) < settings.near_dup_threshold
        };
        if !accepted.iter().any(near) {
            accepted.push(candidate);
            continue;
        }
        if !candidate.protected(settings) {
            tracing::trace!(name = %candidate.name, color = %candidate.color, "near duplicate dropped");
            continue;
        }
        let displaced = accepted
            .iter()
            .position(|e| near(e) && !e.protected(settings));
        match displaced {
            Some(i) => accepted[i] = candidate,
            // Only other anchors nearby; anchors are always kept.
            None => accepted.push(candidate),
        }
    }
    accepted
}

/// Drop neutrals past `cap`, preferring role neutrals, keeping order.
fn cap_neutrals(entries: Vec<ProjectColorEntry>, cap: usize) -> Vec<ProjectColorEntry> {
    let neutral: Vec<bool> = entries.iter().map(|e| e.color.is_neutral()).collect();
    let neutral_count = neutral.iter().filter(|&&n| n).count();
    if neutral_count <= cap {
        return entries;
    }

    let neutral_idx: Vec<usize> = (0..entries.len()).filter(|&i| neutral[i]).collect();
    let (mut keep, rest): (Vec<usize>, Vec<usize>) =
        neutral_idx.into_iter().partition(|&i| entries[i].is_role);
    keep.extend(rest);
    keep.truncate(cap);

    entries
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !neutral[*i] || keep.contains(i))
        .map(|(_, e)| e)
        .collect()
}

/// Role first, anchor first, hue ascending, luminance descending.
fn order(a: &ProjectColorEntry, b: &ProjectColorEntry) -> Ordering {
    b.is_role
        .cmp(&a.is_role)
        .then(b.is_anchor.cmp(&a.is_anchor))
        .then_with(|| a.color.to_hsl().h.total_cmp(&b.color.to_hsl().h))
        .then_with(|| relative_luminance(b.color).total_cmp(&relative_luminance(a.color)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
