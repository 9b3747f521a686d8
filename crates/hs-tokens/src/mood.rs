//! Mood clusters: seeded, constraint-checked color boards.
//!
//! A cluster is ten slots around a base color and one "required" color:
//!
//! ```text
//! required │ anchor × 4–6 │ supporting × ≤2 │ neutral × rest │ contrast
//! ```
//!
//! Every slot that carries a visible hue (not a neutral role, family or
//! color) must sit at least `min_hue_distance` degrees away from every
//! other such slot. The solver is greedy and bounded:
//!
//! 1. anchors walk a type-specific list of hue offsets from the base,
//!    then try random hues;
//! 2. supporting and contrast slots sample hues inside their family range;
//! 3. when attempts run out, the hue with the widest clearance is scanned
//!    for and accepted anyway, and the slot is flagged `relaxed`.
//!
//! Hues are always read back from the final 8-bit color, so the distance
//! rule holds for exactly the values a caller sees.
//!
//! Each slot draws from its own derived stream, so locking one slot does
//! not reshuffle the random choices of the others.

use std::fmt;

use hs_color::{Color, hue_distance};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::harmony::HarmonyMode;
use crate::params::{GenerationParameters, ThemeMode};
use crate::rng::SeededRng;

/// Total slots in a cluster.
pub const SLOT_COUNT: usize = 10;

/// Resolution of the best-effort hue scan, in degrees.
const SCAN_STEP: f64 = 0.5;
/// Saturation a supporting or contrast color falls back to when no hue clears.
const DESATURATED: f64 = 5.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Flavor of a mood cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterType {
    Smoky,
    #[default]
    Bright,
    Deep,
    WarmDrift,
    CoolDrift,
}

impl ClusterType {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Smoky,
            Self::Bright,
            Self::Deep,
            Self::WarmDrift,
            Self::CoolDrift,
        ]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smoky => "smoky",
            Self::Bright => "bright",
            Self::Deep => "deep",
            Self::WarmDrift => "warm-drift",
            Self::CoolDrift => "cool-drift",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().replace('-', "") == key)
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Smoky => "Smoky",
            Self::Bright => "Bright",
            Self::Deep => "Deep",
            Self::WarmDrift => "Warm Drift",
            Self::CoolDrift => "Cool Drift",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Smoky => "Muted, low-saturation tones clustered around the base.",
            Self::Bright => "Saturated, evenly spread hues with high energy.",
            Self::Deep => "Dark, rich tones with a complementary counterweight.",
            Self::WarmDrift => "Hues pulled toward reds, oranges and golds.",
            Self::CoolDrift => "Hues pulled toward blues, teals and violets.",
        }
    }

    const fn tuning(self) -> Tuning {
        const SPREAD: [f64; 9] = [0.0, 40.0, -40.0, 80.0, -80.0, 120.0, -120.0, 160.0, 200.0];
        match self {
            Self::Smoky => Tuning {
                anchors: 4,
                supporting: 1,
                saturation: (14.0, 32.0),
                lightness: (35.0, 65.0),
                offsets: SPREAD,
                drift_center: None,
                // green, blue, purple, neutral
                family_weights: [2, 3, 2, 5],
            },
            Self::Bright => Tuning {
                anchors: 6,
                supporting: 2,
                saturation: (70.0, 95.0),
                lightness: (48.0, 62.0),
                offsets: SPREAD,
                drift_center: None,
                family_weights: [3, 3, 3, 1],
            },
            Self::Deep => Tuning {
                anchors: 4,
                supporting: 2,
                saturation: (45.0, 75.0),
                lightness: (18.0, 34.0),
                offsets: [0.0, -40.0, 40.0, 180.0, -80.0, 80.0, 140.0, -140.0, 100.0],
                drift_center: None,
                family_weights: [2, 3, 3, 1],
            },
            Self::WarmDrift => Tuning {
                anchors: 5,
                supporting: 2,
                saturation: (50.0, 80.0),
                lightness: (45.0, 60.0),
                offsets: SPREAD,
                drift_center: Some(35.0),
                family_weights: [2, 1, 1, 2],
            },
            Self::CoolDrift => Tuning {
                anchors: 5,
                supporting: 2,
                saturation: (40.0, 70.0),
                lightness: (42.0, 60.0),
                offsets: SPREAD,
                drift_center: Some(215.0),
                family_weights: [2, 3, 3, 1],
            },
        }
    }

    /// How this cluster maps onto the token engine.
    const fn palette_modes(self) -> (HarmonyMode, ThemeMode) {
        match self {
            Self::Smoky => (HarmonyMode::Monochromatic, ThemeMode::Dark),
            Self::Bright => (HarmonyMode::Triadic, ThemeMode::Pop),
            Self::Deep => (HarmonyMode::Complementary, ThemeMode::Dark),
            Self::WarmDrift => (HarmonyMode::Analogous, ThemeMode::Light),
            Self::CoolDrift => (HarmonyMode::SplitComplementary, ThemeMode::Light),
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct Tuning {
    anchors: usize,
    supporting: usize,
    saturation: (f64, f64),
    lightness: (f64, f64),
    /// Anchor hue offsets from the base, in priority order.
    offsets: [f64; 9],
    /// When set, offsets are re-ordered to land nearest this hue first.
    drift_center: Option<f64>,
    family_weights: [u32; 4],
}

/// What a slot is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Required,
    Anchor,
    Supporting,
    Neutral,
    Contrast,
}

impl SlotRole {
    /// Solve order: contrast claims its hue before the supporting slots.
    const fn placement_rank(self) -> u8 {
        match self {
            Self::Required => 0,
            Self::Anchor => 1,
            Self::Contrast => 2,
            Self::Supporting => 3,
            Self::Neutral => 4,
        }
    }
}

/// Color family a slot samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Derived from the base color (required and anchor slots).
    Base,
    Green,
    Blue,
    Purple,
    Neutral,
    Contrast,
}

impl Family {
    const SUPPORTING: [Self; 4] = [Self::Green, Self::Blue, Self::Purple, Self::Neutral];

    /// Hue window as `(start, width)`, plus saturation and lightness ranges.
    const fn ranges(self) -> Option<((f64, f64), (f64, f64), (f64, f64))> {
        match self {
            Self::Green => Some(((95.0, 65.0), (35.0, 65.0), (35.0, 55.0))),
            Self::Blue => Some(((195.0, 45.0), (40.0, 70.0), (40.0, 60.0))),
            Self::Purple => Some(((260.0, 40.0), (30.0, 60.0), (40.0, 60.0))),
            Self::Base | Self::Neutral | Self::Contrast => None,
        }
    }
}

/// One cell of a mood cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub role: SlotRole,
    pub family: Family,
    pub locked: bool,
    pub color: Option<Color>,
    /// The hue-distance rule could not be met; the closest option was taken.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub relaxed: bool,
}

impl Slot {
    fn new(id: String, role: SlotRole, family: Family) -> Self {
        Self {
            id,
            role,
            family,
            locked: false,
            color: None,
            relaxed: false,
        }
    }

    /// Hue this slot contributes to the distance rule, if any.
    #[must_use]
    pub fn constrained_hue(&self) -> Option<f64> {
        if self.role == SlotRole::Neutral || self.family == Family::Neutral {
            return None;
        }
        self.color.filter(|c| !c.is_neutral()).map(|c| c.to_hsl().h)
    }
}

/// Caps and thresholds for the hue solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverLimits {
    /// Random hue attempts per anchor once the offset list is used up.
    pub anchor_attempts: usize,
    /// Random hue attempts per supporting or contrast slot.
    pub family_attempts: usize,
    /// Minimum circular distance between constrained hues, in degrees.
    pub min_hue_distance: f64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            anchor_attempts: 24,
            family_attempts: 12,
            min_hue_distance: 24.0,
        }
    }
}

/// Input for [`generate_cluster`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterRequest {
    pub base_color: String,
    pub required_color: String,
    #[serde(rename = "type")]
    pub cluster_type: ClusterType,
    pub seed: u32,
}

impl Default for ClusterRequest {
    fn default() -> Self {
        Self {
            base_color: "#3366ff".to_owned(),
            required_color: "#ff6633".to_owned(),
            cluster_type: ClusterType::Bright,
            seed: 1,
        }
    }
}

/// A generated board. Edits return new clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCluster {
    pub id: String,
    #[serde(rename = "type")]
    pub cluster_type: ClusterType,
    pub seed: u32,
    pub title: String,
    pub description: String,
    pub base_color: Color,
    pub required_color: Color,
    pub slots: Vec<Slot>,
    pub palette_spec: GenerationParameters,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Generate a fresh cluster with default solver limits.
///
/// # Errors
///
/// [`Error::Color`] when either hex string is malformed.
pub fn generate_cluster(request: &ClusterRequest) -> Result<MoodCluster> {
    generate_cluster_with(request, &SolverLimits::default())
}

/// Generate a fresh cluster with explicit solver limits.
///
/// # Errors
///
/// [`Error::Color`] when either hex string is malformed.
pub fn generate_cluster_with(request: &ClusterRequest, limits: &SolverLimits) -> Result<MoodCluster> {
    let base = Color::hex(&request.base_color)?;
    let required = Color::hex(&request.required_color)?;
    let ty = request.cluster_type;

    let slots = Solver::new(base, required, ty, request.seed, limits).solve(None);
    let (harmony_mode, theme_mode) = ty.palette_modes();

    Ok(MoodCluster {
        id: format!("{}-{}", ty.name(), request.seed),
        cluster_type: ty,
        seed: request.seed,
        title: ty.title().to_owned(),
        description: ty.description().to_owned(),
        base_color: base,
        required_color: required,
        slots,
        palette_spec: GenerationParameters::new(&base.to_hex())
            .with_harmony(harmony_mode)
            .with_theme(theme_mode),
    })
}

impl MoodCluster {
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Re-derive every unlocked slot from `seed`, keeping locked ones and
    /// treating their hues as taken.
    #[must_use]
    pub fn regenerate(&self, seed: u32) -> Self {
        self.regenerate_with(seed, &SolverLimits::default())
    }

    #[must_use]
    pub fn regenerate_with(&self, seed: u32, limits: &SolverLimits) -> Self {
        let ty = self.cluster_type;
        let slots = Solver::new(self.base_color, self.required_color, ty, seed, limits)
            .solve(Some(&self.slots));
        Self {
            id: format!("{}-{seed}", ty.name()),
            seed,
            slots,
            ..self.clone()
        }
    }

    /// Lock or unlock a slot.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSlot`] when no slot has this id.
    pub fn with_slot_locked(&self, id: &str, locked: bool) -> Result<Self> {
        self.edit_slot(id, |slot| slot.locked = locked)
    }

    /// Set a slot's color by hand. The slot becomes locked.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownSlot`] when no slot has this id.
    pub fn with_slot_color(&self, id: &str, color: Color) -> Result<Self> {
        self.edit_slot(id, |slot| {
            slot.color = Some(color);
            slot.locked = true;
            slot.relaxed = false;
        })
    }

    fn edit_slot(&self, id: &str, edit: impl FnOnce(&mut Slot)) -> Result<Self> {
        let mut next = self.clone();
        let slot = next
            .slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSlot(id.to_owned()))?;
        edit(slot);
        Ok(next)
    }

    /// Pairs of constrained slots closer than `min_distance` degrees.
    #[must_use]
    pub fn hue_conflicts(&self, min_distance: f64) -> Vec<(&str, &str)> {
        let hued: Vec<(&str, f64)> = self
            .slots
            .iter()
            .filter_map(|s| s.constrained_hue().map(|h| (s.id.as_str(), h)))
            .collect();
        let mut conflicts = Vec::new();
        for (i, &(a, ha)) in hued.iter().enumerate() {
            for &(b, hb) in &hued[i + 1..] {
                if hue_distance(ha, hb) < min_distance {
                    conflicts.push((a, b));
                }
            }
        }
        conflicts
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

struct Solver<'a> {
    base: Color,
    required: Color,
    ty: ClusterType,
    seed: u32,
    limits: &'a SolverLimits,
    /// Constrained hues accepted so far (including locked slots).
    taken: Vec<f64>,
}

/// Supporting-family draw state, shared by the supporting slots of one solve.
struct FamilyDraw {
    rng: SeededRng,
    weights: [u32; 4],
}

/// A chosen color and whether the distance rule had to give.
struct Pick {
    color: Color,
    relaxed: bool,
}

impl<'a> Solver<'a> {
    fn new(base: Color, required: Color, ty: ClusterType, seed: u32, limits: &'a SolverLimits) -> Self {
        Self {
            base,
            required,
            ty,
            seed,
            limits,
            taken: Vec::with_capacity(SLOT_COUNT),
        }
    }

    fn solve(mut self, previous: Option<&[Slot]>) -> Vec<Slot> {
        let locked: Vec<&Slot> = previous
            .unwrap_or_default()
            .iter()
            .filter(|s| s.locked && s.color.is_some())
            .collect();
        self.taken.extend(locked.iter().filter_map(|s| s.constrained_hue()));

        let plan = previous.map_or_else(|| self.fresh_plan(), <[Slot]>::to_vec);
        let tuning = self.ty.tuning();
        let mut offsets = self.anchor_offsets(&tuning).into_iter();
        let mut draw: Option<FamilyDraw> = None;

        // Contrast is placed before supporting slots so the free gaps left
        // after the anchors go to it first.
        let mut order: Vec<usize> = (0..plan.len()).collect();
        order.sort_by_key(|&i| plan[i].role.placement_rank());

        let mut placed: Vec<Option<Slot>> = vec![None; plan.len()];
        for i in order {
            let mut planned = plan[i].clone();
            if let Some(kept) = locked.iter().find(|s| s.id == planned.id) {
                placed[i] = Some((*kept).clone());
                continue;
            }
            let mut rng = SeededRng::derive(self.seed, &format!("{}/{}", self.ty.name(), planned.id));
            let pick = match planned.role {
                SlotRole::Required => Pick {
                    color: self.required,
                    relaxed: false,
                },
                SlotRole::Anchor => self.anchor(&tuning, &mut offsets, &mut rng),
                SlotRole::Supporting => {
                    if previous.is_none() {
                        let draw = draw.get_or_insert_with(|| self.family_draw(&tuning));
                        planned.family = self.next_family(draw);
                    }
                    self.supporting(planned.family, &mut rng)
                }
                SlotRole::Neutral => self.neutral(&mut rng),
                SlotRole::Contrast => self.contrast(&mut rng),
            };
            if pick.relaxed {
                tracing::debug!(
                    slot = %planned.id,
                    color = %pick.color,
                    "hue distance relaxed"
                );
            }
            let slot = Slot {
                color: Some(pick.color),
                relaxed: pick.relaxed,
                locked: false,
                ..planned
            };
            self.taken.extend(slot.constrained_hue());
            placed[i] = Some(slot);
        }
        placed.into_iter().flatten().collect()
    }

    /// Slot ids, roles and families for a new cluster.
    fn fresh_plan(&self) -> Vec<Slot> {
        let tuning = self.ty.tuning();
        let mut plan = Vec::with_capacity(SLOT_COUNT);
        plan.push(Slot::new("required".to_owned(), SlotRole::Required, Family::Base));
        for i in 1..=tuning.anchors {
            plan.push(Slot::new(format!("anchor-{i}"), SlotRole::Anchor, Family::Base));
        }
        for i in 1..=tuning.supporting {
            plan.push(Slot::new(format!("support-{i}"), SlotRole::Supporting, Family::Neutral));
        }
        let neutrals = SLOT_COUNT - plan.len() - 1;
        for i in 1..=neutrals {
            plan.push(Slot::new(format!("neutral-{i}"), SlotRole::Neutral, Family::Neutral));
        }
        plan.push(Slot::new("contrast".to_owned(), SlotRole::Contrast, Family::Contrast));
        plan
    }

    fn family_draw(&self, tuning: &Tuning) -> FamilyDraw {
        FamilyDraw {
            rng: SeededRng::derive(self.seed, &format!("{}/families", self.ty.name())),
            weights: tuning.family_weights,
        }
    }

    /// Weighted draw without replacement. A colored family is only eligible
    /// if some hue in its window still clears everything taken so far;
    /// neutral is always eligible.
    fn next_family(&self, draw: &mut FamilyDraw) -> Family {
        let mut eligible = draw.weights;
        for (weight, family) in eligible.iter_mut().zip(Family::SUPPORTING) {
            if let Some((window, s, l)) = family.ranges() {
                let best = self.widest(window, f64::midpoint(s.0, s.1), f64::midpoint(l.0, l.1));
                if best.relaxed {
                    *weight = 0;
                }
            }
        }
        draw.rng.weighted_index(&eligible).map_or(Family::Neutral, |i| {
            draw.weights[i] = 0;
            Family::SUPPORTING[i]
        })
    }

    fn anchor_offsets(&self, tuning: &Tuning) -> Vec<f64> {
        let mut offsets = tuning.offsets.to_vec();
        if let Some(center) = tuning.drift_center {
            let base_h = self.base.to_hsl().h;
            offsets.sort_by(|a, b| {
                hue_distance(base_h + a, center).total_cmp(&hue_distance(base_h + b, center))
            });
        }
        offsets
    }

    fn anchor(
        &self,
        tuning: &Tuning,
        offsets: &mut impl Iterator<Item = f64>,
        rng: &mut SeededRng,
    ) -> Pick {
        let base_h = self.base.to_hsl().h;
        let s = rng.range_f64(tuning.saturation.0, tuning.saturation.1);
        let l = rng.range_f64(tuning.lightness.0, tuning.lightness.1);

        for offset in offsets.by_ref() {
            let color = Color::hsl(base_h + offset, s, l);
            if self.clear(color) {
                return Pick { color, relaxed: false };
            }
        }
        for _ in 0..self.limits.anchor_attempts {
            let color = Color::hsl(rng.range_f64(0.0, 360.0), s, l);
            if self.clear(color) {
                return Pick { color, relaxed: false };
            }
        }
        self.widest((0.0, 360.0 - SCAN_STEP), s, l)
    }

    fn supporting(&self, family: Family, rng: &mut SeededRng) -> Pick {
        let Some((window, s, l)) = family.ranges() else {
            return self.neutral(rng);
        };
        let s = rng.range_f64(s.0, s.1);
        let l = rng.range_f64(l.0, l.1);
        self.or_desaturated(self.sample(window, s, l, rng))
    }

    fn contrast(&self, rng: &mut SeededRng) -> Pick {
        let base = self.base.to_hsl();
        let s = rng.range_f64(30.0, 60.0);
        let l = if base.l >= 50.0 {
            rng.range_f64(8.0, 16.0)
        } else {
            rng.range_f64(86.0, 94.0)
        };
        let opposite = Color::hsl(base.h + 180.0, s, l);
        if self.clear(opposite) {
            return Pick {
                color: opposite,
                relaxed: false,
            };
        }
        self.or_desaturated(self.sample((0.0, 360.0 - SCAN_STEP), s, l, rng))
    }

    /// Trade a relaxed pick for a near-gray at the same hue and lightness,
    /// which no longer competes for hue.
    fn or_desaturated(&self, pick: Pick) -> Pick {
        if !pick.relaxed {
            return pick;
        }
        let hsl = pick.color.to_hsl();
        let color = Color::hsl(hsl.h, DESATURATED, hsl.l);
        tracing::debug!(from = %pick.color, to = %color, "desaturated to clear hue distance");
        Pick {
            color,
            relaxed: !self.clear(color),
        }
    }

    /// Unconstrained near-gray in the base hue.
    fn neutral(&self, rng: &mut SeededRng) -> Pick {
        let s = rng.range_f64(2.0, 8.0);
        let l = rng.range_f64(25.0, 75.0);
        Pick {
            color: Color::hsl(self.base.to_hsl().h, s, l),
            relaxed: false,
        }
    }

    /// Rejection-sample hues in `window`, then fall back to the widest gap.
    fn sample(&self, window: (f64, f64), s: f64, l: f64, rng: &mut SeededRng) -> Pick {
        let (start, width) = window;
        for _ in 0..self.limits.family_attempts {
            let color = Color::hsl(rng.range_f64(start, start + width), s, l);
            if self.clear(color) {
                return Pick { color, relaxed: false };
            }
        }
        self.widest(window, s, l)
    }

    fn clear(&self, color: Color) -> bool {
        color.is_neutral() || clearance(color.to_hsl().h, &self.taken) >= self.limits.min_hue_distance
    }

    /// Scan `window` for the hue farthest from everything taken.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn widest(&self, window: (f64, f64), s: f64, l: f64) -> Pick {
        let (start, width) = window;
        let steps = (width / SCAN_STEP).floor() as usize;
        let mut best = (Color::hsl(start, s, l), f64::NEG_INFINITY);
        for i in 0..=steps {
            let color = Color::hsl((i as f64).mul_add(SCAN_STEP, start), s, l);
            let room = if color.is_neutral() {
                f64::INFINITY
            } else {
                clearance(color.to_hsl().h, &self.taken)
            };
            if room > best.1 {
                best = (color, room);
            }
        }
        Pick {
            color: best.0,
            relaxed: best.1 < self.limits.min_hue_distance,
        }
    }
}

/// Smallest circular distance from `hue` to any of `taken`.
fn clearance(hue: f64, taken: &[f64]) -> f64 {
    taken
        .iter()
        .map(|&t| hue_distance(hue, t))
        .fold(f64::INFINITY, f64::min)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(ty: ClusterType, seed: u32) -> ClusterRequest {
        ClusterRequest {
            cluster_type: ty,
            seed,
            ..ClusterRequest::default()
        }
    }

    fn cluster(ty: ClusterType, seed: u32) -> MoodCluster {
        generate_cluster(&request(ty, seed)).unwrap()
    }

    fn colors(c: &MoodCluster) -> Vec<Option<Color>> {
        c.slots.iter().map(|s| s.color).collect()
    }

    // ── plan ────────────────────────────────────────────────────────

    #[test]
    fn every_type_has_ten_colored_slots() {
        for &ty in ClusterType::all() {
            let c = cluster(ty, 7);
            assert_eq!(c.slots.len(), SLOT_COUNT, "{ty}");
            assert!(c.slots.iter().all(|s| s.color.is_some()), "{ty}");
            assert_eq!(c.slots[0].role, SlotRole::Required);
            assert_eq!(c.slots[SLOT_COUNT - 1].role, SlotRole::Contrast);

            let anchors = c.slots.iter().filter(|s| s.role == SlotRole::Anchor).count();
            assert!((4..=6).contains(&anchors), "{ty}: {anchors} anchors");
            let supporting = c.slots.iter().filter(|s| s.role == SlotRole::Supporting).count();
            assert!(supporting <= 2, "{ty}");
        }
    }

    #[test]
    fn required_slot_is_required_color() {
        for seed in 0..8 {
            let c = cluster(ClusterType::Deep, seed);
            assert_eq!(c.slot("required").unwrap().color, Some(c.required_color));
        }
    }

    #[test]
    fn slot_ids_are_unique() {
        let c = cluster(ClusterType::Smoky, 3);
        let mut ids: Vec<&str> = c.slots.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SLOT_COUNT);
    }

    #[test]
    fn palette_spec_follows_type() {
        let c = cluster(ClusterType::Bright, 1);
        assert_eq!(c.palette_spec.base_color, "#3366ff");
        assert_eq!(c.palette_spec.harmony_mode, HarmonyMode::Triadic);
        assert_eq!(c.palette_spec.theme_mode, ThemeMode::Pop);
    }

    // ── determinism ─────────────────────────────────────────────────

    #[test]
    fn same_seed_same_cluster() {
        for &ty in ClusterType::all() {
            assert_eq!(cluster(ty, 99), cluster(ty, 99));
        }
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(
            colors(&cluster(ClusterType::Bright, 1)),
            colors(&cluster(ClusterType::Bright, 2))
        );
    }

    #[test]
    fn regenerate_without_locks_reproduces() {
        let c = cluster(ClusterType::WarmDrift, 11);
        assert_eq!(colors(&c.regenerate(11)), colors(&c));
    }

    #[test]
    fn locked_slot_survives_regeneration() {
        let c = cluster(ClusterType::CoolDrift, 5);
        let kept = c.slot("anchor-2").unwrap().color;
        let locked = c.with_slot_locked("anchor-2", true).unwrap();
        for seed in [6, 7, 8] {
            let next = locked.regenerate(seed);
            assert_eq!(next.slot("anchor-2").unwrap().color, kept);
            assert!(next.slot("anchor-2").unwrap().locked);
        }
    }

    #[test]
    fn edited_required_slot_stays_edited() {
        let c = cluster(ClusterType::Bright, 2);
        let custom = Color::hex("#123456").unwrap();
        let edited = c.with_slot_color("required", custom).unwrap();
        assert_eq!(edited.regenerate(3).slot("required").unwrap().color, Some(custom));

        let unlocked = edited.with_slot_locked("required", false).unwrap();
        assert_eq!(
            unlocked.regenerate(3).slot("required").unwrap().color,
            Some(c.required_color)
        );
    }

    #[test]
    fn unknown_slot_is_an_error() {
        let err = cluster(ClusterType::Smoky, 1)
            .with_slot_locked("anchor-99", true)
            .unwrap_err();
        assert_eq!(err, Error::UnknownSlot("anchor-99".into()));
    }

    // ── constraint ──────────────────────────────────────────────────

    #[test]
    fn conflicts_are_always_flagged() {
        for &ty in ClusterType::all() {
            for seed in 0..24 {
                let c = cluster(ty, seed);
                for (a, b) in c.hue_conflicts(24.0) {
                    let relaxed = c.slot(a).unwrap().relaxed || c.slot(b).unwrap().relaxed;
                    assert!(relaxed, "{ty}/{seed}: {a} vs {b} unflagged");
                }
            }
        }
    }

    #[test]
    fn impossible_limits_relax_but_never_fail() {
        let limits = SolverLimits {
            anchor_attempts: 2,
            family_attempts: 2,
            min_hue_distance: 100.0,
        };
        let c = generate_cluster_with(&request(ClusterType::Bright, 4), &limits).unwrap();
        assert_eq!(c.slots.len(), SLOT_COUNT);
        assert!(c.slots.iter().all(|s| s.color.is_some()));
        assert!(c.slots.iter().any(|s| s.relaxed));
        for (a, b) in c.hue_conflicts(100.0) {
            assert!(c.slot(a).unwrap().relaxed || c.slot(b).unwrap().relaxed);
        }
    }

    #[test]
    fn crowded_supporting_and_contrast_fall_back_to_gray() {
        let limits = SolverLimits {
            min_hue_distance: 100.0,
            ..SolverLimits::default()
        };
        let c = generate_cluster_with(&request(ClusterType::Bright, 4), &limits).unwrap();
        for slot in c
            .slots
            .iter()
            .filter(|s| matches!(s.role, SlotRole::Supporting | SlotRole::Contrast))
        {
            assert!(!slot.relaxed, "{}", slot.id);
            assert_eq!(slot.constrained_hue(), None, "{}", slot.id);
        }
    }

    #[test]
    fn contrast_is_solved_before_supporting() {
        let mut roles = [
            SlotRole::Neutral,
            SlotRole::Supporting,
            SlotRole::Contrast,
            SlotRole::Anchor,
            SlotRole::Required,
        ];
        roles.sort_by_key(|r| r.placement_rank());
        assert_eq!(
            roles,
            [
                SlotRole::Required,
                SlotRole::Anchor,
                SlotRole::Contrast,
                SlotRole::Supporting,
                SlotRole::Neutral,
            ]
        );
    }

    #[test]
    fn locked_hues_are_respected() {
        let c = cluster(ClusterType::Smoky, 9);
        let locked = c
            .with_slot_color("anchor-1", Color::hsl(100.0, 80.0, 50.0))
            .unwrap();
        let next = locked.regenerate(10);
        for (a, b) in next.hue_conflicts(24.0) {
            assert!(next.slot(a).unwrap().relaxed || next.slot(b).unwrap().relaxed);
        }
    }

    #[test]
    fn neutral_slots_are_near_gray() {
        let c = cluster(ClusterType::Smoky, 2);
        for slot in c.slots.iter().filter(|s| s.role == SlotRole::Neutral) {
            assert!(slot.color.unwrap().is_neutral(), "{}", slot.id);
            assert_eq!(slot.constrained_hue(), None);
        }
    }

    // ── serde ───────────────────────────────────────────────────────

    #[test]
    fn persistence_shape() {
        let c = cluster(ClusterType::WarmDrift, 3);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "warm-drift");
        assert_eq!(json["seed"], 3);
        assert_eq!(json["slots"][0]["role"], "required");
        assert_eq!(json["slots"][0]["color"], "#ff6633");
        assert!(json["paletteSpec"]["baseColor"].is_string());

        let back: MoodCluster = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn type_names() {
        assert_eq!(ClusterType::from_name("Warm Drift"), Some(ClusterType::WarmDrift));
        assert_eq!(ClusterType::from_name("cool_drift"), Some(ClusterType::CoolDrift));
        assert_eq!(ClusterType::from_name("plaid"), None);
    }
}
