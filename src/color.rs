//! Color conversion and the small fixed palette.
//!
//! Enemy tints are sampled in HSL (uniform warm hue, full saturation, mid
//! lightness) and converted here. The conversion deliberately truncates when
//! scaling to 0–255 instead of rounding; the tint tables and tests below
//! depend on those exact integer triples, so do not "fix" the truncation.

use bevy::prelude::*;

/// Piecewise-linear HSL → RGB conversion.
///
/// `hue` in degrees [0, 360), `saturation` and `lightness` in [0, 100].
/// Six 60° sectors each assign the chroma/secondary/zero components to a
/// distinct (R, G, B) permutation; the lightness offset is added afterward
/// and each channel is scaled to 0–255 and truncated toward zero.
/// A hue outside [0, 360) falls through every sector, leaving only the
/// lightness offset `m` on each channel.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let s = saturation / 100.0;
    let l = lightness / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&hue) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&hue) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&hue) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&hue) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&hue) {
        (x, 0.0, c)
    } else if (300.0..360.0).contains(&hue) {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// The player's light-blue body color.
pub fn player_blue() -> Color {
    Color::srgb_u8(135, 206, 235)
}

/// Background fill: a dark navy, not pure black.
pub fn background_navy() -> Color {
    Color::srgb_u8(26, 26, 46)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
