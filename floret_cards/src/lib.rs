// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Cards: the selectable card list over the garden's placements.
//!
//! Cards are a pure projection: the garden's placements, resolved through
//! the catalog, filtered by user-specified height/spread bounds. Placements
//! the catalog cannot resolve are excluded rather than rendered half-empty.
//! Nothing here mutates state; the card's "add an instance" action lives in
//! the session layer, which places the new instance at the garden's
//! geometric center.
//!
//! ```rust
//! use floret_cards::{FilterBounds, visible_cards};
//! use floret_catalog::{PlantRecord, RecordLookup, Rgb8};
//! use floret_garden::{GardenState, PlacementKey};
//!
//! struct One(PlantRecord);
//! impl RecordLookup for One {
//!     fn record(&self, key: &PlacementKey) -> Option<&PlantRecord> {
//!         (self.0.key == *key).then_some(&self.0)
//!     }
//! }
//!
//! let mut garden = GardenState::new();
//! garden.toggle_placement("p1", "c1", None);
//! garden.add_position("p1", "c1", 5.0, 5.0);
//!
//! let records = One(PlantRecord {
//!     key: PlacementKey::new("p1", "c1"),
//!     common_name: "Bee Balm".into(),
//!     scientific_name: "Monarda didyma".into(),
//!     color_name: "Red".into(),
//!     color: Rgb8::new(0xcc, 0x22, 0x33),
//!     height: Some(3.0),
//!     spread: Some(2.0),
//!     niche_id: None,
//!     niche_name: None,
//!     native: true,
//!     bloom: vec![],
//!     features: vec![],
//! });
//!
//! let cards = visible_cards(&garden, &records, &FilterBounds::default());
//! assert_eq!(cards.len(), 1);
//! assert_eq!(cards[0].quantity, 1);
//!
//! // A min-height bound above the record's height hides the card.
//! let tall_only = FilterBounds { height_min: Some(4.0), ..Default::default() };
//! assert!(visible_cards(&garden, &records, &tall_only).is_empty());
//! ```

use floret_catalog::{RecordLookup, Rgb8};
use floret_garden::{GardenState, PlacementKey};

/// User-specified height/spread bounds, in feet.
///
/// `None` means the bound is blank: no lower bound (0) or no upper bound
/// (+∞). A bound that is set excludes records the catalog has no value for;
/// an unknown height cannot satisfy "at least 2 ft".
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FilterBounds {
    /// Minimum height, inclusive.
    pub height_min: Option<f64>,
    /// Maximum height, inclusive.
    pub height_max: Option<f64>,
    /// Minimum spread, inclusive.
    pub spread_min: Option<f64>,
    /// Maximum spread, inclusive.
    pub spread_max: Option<f64>,
}

impl FilterBounds {
    /// Returns `true` when the record's height and spread fall within bounds.
    #[must_use]
    pub fn admits(&self, height: Option<f64>, spread: Option<f64>) -> bool {
        within(height, self.height_min, self.height_max)
            && within(spread, self.spread_min, self.spread_max)
    }
}

fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    match (min, max) {
        (None, None) => true,
        _ => {
            let Some(value) = value else {
                return false;
            };
            min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
        }
    }
}

/// One visible card: display fields plus the current instance count.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantCard {
    /// The placement this card represents.
    pub key: PlacementKey,
    /// Common display name.
    pub common_name: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Bloom color display name.
    pub color_name: String,
    /// Bloom color.
    pub color: Rgb8,
    /// Height in feet, when known.
    pub height: Option<f64>,
    /// Spread in feet, when known.
    pub spread: Option<f64>,
    /// Number of instances currently placed on the canvas.
    pub quantity: usize,
}

/// Projects the garden's placements into filtered, displayable cards.
///
/// Cards come out in placement insertion order. Placements without a
/// resolved record are excluded, as are records outside the bounds.
#[must_use]
pub fn visible_cards(
    state: &GardenState,
    records: &impl RecordLookup,
    bounds: &FilterBounds,
) -> Vec<PlantCard> {
    state
        .plants
        .iter()
        .filter_map(|placement| {
            let record = records.record(&placement.key)?;
            bounds
                .admits(record.height, record.spread)
                .then(|| PlantCard {
                    key: placement.key.clone(),
                    common_name: record.common_name.clone(),
                    scientific_name: record.scientific_name.clone(),
                    color_name: record.color_name.clone(),
                    color: record.color,
                    height: record.height,
                    spread: record.spread,
                    quantity: placement.positions.len(),
                })
        })
        .collect()
}
