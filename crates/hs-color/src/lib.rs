// SPDX-License-Identifier: MIT
//
// hs-color — color primitives for the huesmith token engine.
//
// Everything downstream (harmony, contrast convergence, token synthesis,
// mood clusters, project merging) speaks in terms of the types here:
//
//   hex string ↔ Color (sRGB, 8-bit) ↔ Hsl       (authoring space)
//                                    ↔ Oklab/Oklch (perceptual space)
//
// HSL is what the generation rules are written in. Oklab is only used
// where straight HSL math looks wrong to a human eye: wide blends and
// "are these two colors the same?" questions.
//
// All functions are pure. Nothing here allocates except hex formatting.

pub mod color;
pub mod error;
pub mod perceptual;
pub mod wcag;

pub use color::{
    Color, Hsl, NEUTRAL_SATURATION, Oklab, Oklch, hex_to_hsl, hsl_to_hex, normalize_hue,
};
pub use error::{Error, Result};
pub use perceptual::{
    PERCEPTUAL_MIX_THRESHOLD, blend_hue, hue_distance, interpolate_hue, perceptual_blend,
    perceptual_distance,
};
pub use wcag::{contrast_ratio, relative_luminance};
