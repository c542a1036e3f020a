// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint values for the two render modes.

use floret_catalog::Rgb8;
use peniko::Color;

/// Alpha applied to bloom-mode fills; strokes stay fully opaque.
pub const BLOOM_FILL_ALPHA: f32 = 0.6;

/// Height at which the topographic ramp saturates, in feet.
///
/// Heights above this clamp to the dark endpoint; the ramp never
/// extrapolates.
pub const TOPO_MAX_HEIGHT: f64 = 8.0;

/// Light ramp endpoint (height 0): a near-white green.
const TOPO_LIGHT: Rgb8 = Rgb8::new(237, 248, 233);
/// Dark ramp endpoint (height ≥ [`TOPO_MAX_HEIGHT`]): a near-black green.
const TOPO_DARK: Rgb8 = Rgb8::new(0, 68, 27);
/// Alpha bounds of the ramp, low at height 0 and high at the clamp.
const TOPO_ALPHA_LOW: f64 = 0.35;
const TOPO_ALPHA_HIGH: f64 = 0.9;

/// Bloom-mode fill: the plant's bloom color at [`BLOOM_FILL_ALPHA`].
#[must_use]
pub fn bloom_fill(color: Rgb8) -> Color {
    Color::from_rgb8(color.r, color.g, color.b).with_alpha(BLOOM_FILL_ALPHA)
}

/// Bloom-mode stroke: the solid bloom color.
#[must_use]
pub fn bloom_stroke(color: Rgb8) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

/// Halo drawn behind bloom-mode labels so they stay legible over any fill.
#[must_use]
pub fn label_halo() -> Color {
    Color::WHITE
}

/// Topographic-mode fill as a function of plant height in feet.
///
/// Linear interpolation between the light and dark endpoints on
/// `height / TOPO_MAX_HEIGHT`, clamped to `[0, 1]`; alpha interpolates on
/// the same parameter, so taller plants render darker and more opaque.
#[must_use]
pub fn topographic_fill(height: f64) -> Color {
    let t = (height / TOPO_MAX_HEIGHT).clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "lerp of two u8 endpoints stays within u8 range"
        )]
        let v = lerp(f64::from(a), f64::from(b), t).round() as u8;
        v
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "alpha endpoints are within f32 range"
    )]
    let alpha = lerp(TOPO_ALPHA_LOW, TOPO_ALPHA_HIGH, t) as f32;
    Color::from_rgb8(
        channel(TOPO_LIGHT.r, TOPO_DARK.r),
        channel(TOPO_LIGHT.g, TOPO_DARK.g),
        channel(TOPO_LIGHT.b, TOPO_DARK.b),
    )
    .with_alpha(alpha)
}

/// Endpoint-exact linear interpolation: `t = 0` yields `a`, `t = 1` yields `b`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
