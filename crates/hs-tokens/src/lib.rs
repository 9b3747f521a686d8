//! # hs-tokens — design-token engine
//!
//! Derives a complete design-token tree from one seed color, a harmony
//! mode and a handful of intensity sliders, then guarantees WCAG contrast
//! on the text pairs that matter.
//!
//! # Architecture
//!
//! ```text
//! GenerationParameters (params.rs)
//!     │
//!     ▼
//! harmony.rs:  hue set + per-mode HarmonySpec (pure math)
//!     │
//!     ▼
//! engine.rs:   palette → contrast passes → TokenTree (tokens.rs)
//!     │            ▲
//!     │            └── contrast.rs: lightness convergence, pair tuning
//!     ▼
//! Generation { tokens, contrast report }
//! ```
//!
//! Two independent entry points share only the color primitives:
//!
//! - `mood.rs`: seeded, hue-distance-constrained mood clusters;
//! - `merge.rs` + `soc.rs`: project-wide swatch merging and `.soc` export.
//!
//! Everything is a pure function of its inputs. Randomness comes from an
//! explicit seed (`rng.rs`); there is no global state.

// Color math casts small integers to floats (indices, step counts).
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness locals are inherently similar.
#![allow(clippy::similar_names)]
// Table-driven profiles: one match arm per mode or theme.
#![allow(clippy::too_many_lines)]
// Single-char math variables (h, s, l) are standard in color science.
#![allow(clippy::many_single_char_names)]

pub mod contrast;
pub mod engine;
pub mod error;
pub mod harmony;
pub mod merge;
pub mod mood;
pub mod params;
pub mod presets;
pub mod rng;
pub mod soc;
pub mod tokens;

pub use contrast::{ContrastFix, Direction, TunedPair, auto_tune_contrast, ensure_contrast};
pub use engine::{ContrastCheck, Generation, generate};
pub use error::{Error, Result};
pub use harmony::{HarmonyMode, HarmonySpec, create_harmony};
pub use merge::{MergeSettings, NamedColor, ProjectColorEntry, ProjectSection, merge_project_colors};
pub use mood::{
    ClusterRequest, ClusterType, Family, MoodCluster, Slot, SlotRole, SolverLimits,
    generate_cluster, generate_cluster_with,
};
pub use params::{GenerationParameters, ThemeMode};
pub use presets::{preset, preset_names, shuffled_presets, surprise};
pub use rng::SeededRng;
pub use soc::{SocEntry, SocOptions, generate_soc};
pub use tokens::{GroupBuilder, TokenLeaf, TokenNode, TokenTree, TokenType, TokenValue};
