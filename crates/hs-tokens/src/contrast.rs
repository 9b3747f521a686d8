//! WCAG contrast enforcement for readable text.
//!
//! Two strategies, both moving only HSL lightness so hue and saturation
//! survive:
//!
//! - [`ensure_contrast`] nudges one foreground color in 2-unit steps until
//!   it clears the target against a fixed background, and falls back to
//!   pure black or white if it cannot.
//! - [`auto_tune_contrast`] pushes a pair apart (lighter one up, darker one
//!   down) for a bounded number of steps and returns whatever it reached.
//!
//! Ratios are measured with WCAG relative luminance; adjustments happen in
//! HSL lightness because that is the space the token rules are written in.

use hs_color::{Color, Hsl, contrast_ratio, relative_luminance};

/// Step size for single-color convergence, in HSL lightness units.
const STEP: f64 = 2.0;
/// Iteration cap for single-color convergence.
const MAX_ITERATIONS: usize = 30;
/// Lightness bounds the single-color walk stops at.
const MIN_LIGHTNESS: f64 = 1.0;
const MAX_LIGHTNESS: f64 = 99.0;

/// Step size for pair tuning, on a 0–1 lightness scale.
const PAIR_STEP: f64 = 0.05;
/// Iteration cap for pair tuning.
const PAIR_MAX_ITERATIONS: usize = 20;

/// Which way to move lightness when both directions help equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Lighten,
    Darken,
}

/// Outcome of [`ensure_contrast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastFix {
    /// The adjusted foreground.
    pub color: Color,
    /// Its contrast against the background.
    pub ratio: f64,
    /// True when convergence failed and black/white was substituted.
    pub fallback: bool,
}

/// Adjust `fg` until its contrast against `bg` reaches `target`.
///
/// If the pair already passes, `fg` comes back untouched. Otherwise each
/// iteration evaluates one lighten and one darken step, takes whichever
/// yields more contrast (ties go to `prefer`), and stops on success or
/// when lightness pins at 1 or 99. If the walk never reaches the target
/// the result is pure black or white, whichever contrasts more with `bg`.
#[must_use]
pub fn ensure_contrast(fg: Color, bg: Color, target: f64, prefer: Direction) -> ContrastFix {
    let ratio = contrast_ratio(fg, bg);
    if ratio >= target {
        return ContrastFix {
            color: fg,
            ratio,
            fallback: false,
        };
    }

    let hsl = fg.to_hsl();
    let mut lightness = hsl.l;

    for iteration in 0..MAX_ITERATIONS {
        let up_l = (lightness + STEP).min(MAX_LIGHTNESS);
        let down_l = (lightness - STEP).max(MIN_LIGHTNESS);
        let up = Color::from_hsl(hsl.with_l(up_l));
        let down = Color::from_hsl(hsl.with_l(down_l));
        let up_ratio = contrast_ratio(up, bg);
        let down_ratio = contrast_ratio(down, bg);

        let go_up = if up_ratio > down_ratio {
            true
        } else if down_ratio > up_ratio {
            false
        } else {
            prefer == Direction::Lighten
        };

        let (color, reached, next_l) = if go_up {
            (up, up_ratio, up_l)
        } else {
            (down, down_ratio, down_l)
        };
        lightness = next_l;

        if reached >= target {
            tracing::trace!(iteration, ratio = reached, "contrast converged");
            return ContrastFix {
                color,
                ratio: reached,
                fallback: false,
            };
        }
        if lightness <= MIN_LIGHTNESS || lightness >= MAX_LIGHTNESS {
            break;
        }
    }

    let black = contrast_ratio(Color::BLACK, bg);
    let white = contrast_ratio(Color::WHITE, bg);
    let (color, ratio) = if black >= white {
        (Color::BLACK, black)
    } else {
        (Color::WHITE, white)
    };
    tracing::debug!(
        fg = %fg, bg = %bg, target, ratio,
        "contrast did not converge, falling back to {color}"
    );
    ContrastFix {
        color,
        ratio,
        fallback: true,
    }
}

/// Outcome of [`auto_tune_contrast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunedPair {
    pub fg: Color,
    pub bg: Color,
    pub ratio: f64,
    /// Whether `ratio` reached the target.
    pub met: bool,
    /// Steps taken (0 when the pair already passed).
    pub iterations: usize,
}

/// Push a foreground/background pair apart until `target` is met.
///
/// The lighter of the two (by luminance) moves up and the darker moves
/// down by 0.05 on a 0–1 lightness scale, each clamped, for at most 20
/// steps. Best effort: whatever state the loop ends in is returned.
#[must_use]
pub fn auto_tune_contrast(fg: Color, bg: Color, target: f64) -> TunedPair {
    let ratio = contrast_ratio(fg, bg);
    if ratio >= target {
        return TunedPair {
            fg,
            bg,
            ratio,
            met: true,
            iterations: 0,
        };
    }

    let fg_is_lighter = relative_luminance(fg) >= relative_luminance(bg);
    let fg_hsl = fg.to_hsl();
    let bg_hsl = bg.to_hsl();
    let mut fg_l = fg_hsl.l / 100.0;
    let mut bg_l = bg_hsl.l / 100.0;
    let (mut fg_out, mut bg_out, mut ratio) = (fg, bg, ratio);
    let mut iterations = 0;

    while iterations < PAIR_MAX_ITERATIONS && ratio < target {
        if fg_is_lighter {
            fg_l = (fg_l + PAIR_STEP).min(1.0);
            bg_l = (bg_l - PAIR_STEP).max(0.0);
        } else {
            fg_l = (fg_l - PAIR_STEP).max(0.0);
            bg_l = (bg_l + PAIR_STEP).min(1.0);
        }
        fg_out = Color::from_hsl(Hsl::new(fg_hsl.h, fg_hsl.s, fg_l * 100.0));
        bg_out = Color::from_hsl(Hsl::new(bg_hsl.h, bg_hsl.s, bg_l * 100.0));
        ratio = contrast_ratio(fg_out, bg_out);
        iterations += 1;
    }

    TunedPair {
        fg: fg_out,
        bg: bg_out,
        ratio,
        met: ratio >= target,
        iterations,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
