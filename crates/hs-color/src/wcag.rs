// SPDX-License-Identifier: MIT

//! WCAG 2.x relative luminance and contrast ratio.
//!
//! Uses the WCAG formula literally, including its 0.03928 linearization
//! threshold (sRGB proper uses 0.04045).

use crate::color::Color;

#[inline]
fn channel_luminance(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in [0, 1]: 0 is black, 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    0.2126f64.mul_add(
        channel_luminance(r),
        0.7152f64.mul_add(channel_luminance(g), 0.0722 * channel_luminance(b)),
    )
}

/// Contrast ratio in [1, 21], independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
