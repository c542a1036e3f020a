// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated catalog record types.

use floret_garden::PlacementKey;

/// An sRGB color with 8-bit channels, decoded from a `#rrggbb` hex string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Creates a color from raw channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string (case-insensitive).
    ///
    /// Returns `None` for anything else: missing `#`, wrong length, or
    /// non-hex digits. Shorthand (`#rgb`) and alpha forms are not accepted;
    /// the catalog contract is the six-digit form.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: core::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

/// A named plant feature (for example "Attracts Pollinators").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlantFeature {
    /// Opaque catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional icon URL.
    pub icon: Option<String>,
}

/// A fully-validated catalog record for one plant/color combination.
///
/// Values of this type only come out of the validated decode step in
/// [`decode_resolve_response`](crate::decode_resolve_response); every field
/// has been checked, so downstream code (scene construction, card filtering)
/// never has to defend against partially-shaped data.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantRecord {
    /// The selection this record describes.
    pub key: PlacementKey,
    /// Common display name.
    pub common_name: String,
    /// Scientific (Latin) name.
    pub scientific_name: String,
    /// Display name of the bloom color.
    pub color_name: String,
    /// Bloom color.
    pub color: Rgb8,
    /// Mature height in feet, when the catalog knows it.
    pub height: Option<f64>,
    /// Mature spread (spacing) in feet, when the catalog knows it.
    ///
    /// Spread is treated as a diameter by the layout engine.
    pub spread: Option<f64>,
    /// Niche identifier, used for distinct-niche statistics.
    pub niche_id: Option<String>,
    /// Niche display name.
    pub niche_name: Option<String>,
    /// Whether the plant is native to the region.
    pub native: bool,
    /// Bloom months as short tags (`"jan"` … `"dec"`).
    pub bloom: Vec<String>,
    /// Feature list.
    pub features: Vec<PlantFeature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_six_digit_forms() {
        assert_eq!(Rgb8::from_hex("#8a2be2"), Some(Rgb8::new(0x8a, 0x2b, 0xe2)));
        assert_eq!(Rgb8::from_hex("#FFFFFF"), Some(Rgb8::new(255, 255, 255)));
        assert_eq!(Rgb8::from_hex("#000000"), Some(Rgb8::new(0, 0, 0)));
    }

    #[test]
    fn hex_parsing_rejects_everything_else() {
        for bad in ["8a2be2", "#fff", "#12345", "#1234567", "#8a2bez", "", "#"] {
            assert_eq!(Rgb8::from_hex(bad), None, "{bad:?} should not parse");
        }
    }
}
