// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The garden aggregate: placements, positions, and mutation primitives.

use serde::{Deserialize, Serialize};

/// Default display name for a garden that has never been renamed.
const DEFAULT_NAME: &str = "My Garden";
/// Default garden extents in feet.
const DEFAULT_WIDTH: f64 = 25.0;
const DEFAULT_LENGTH: f64 = 10.0;

/// Composite key identifying one selected plant/color combination.
///
/// The identifiers are opaque to this crate; they are foreign keys into an
/// external plant catalog. Two placements never share a key within one
/// [`GardenState`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementKey {
    /// Opaque catalog identifier of the plant.
    pub plant_id: String,
    /// Opaque catalog identifier of the chosen bloom color.
    pub color_id: String,
}

impl PlacementKey {
    /// Creates a key from the two catalog identifiers.
    pub fn new(plant_id: impl Into<String>, color_id: impl Into<String>) -> Self {
        Self {
            plant_id: plant_id.into(),
            color_id: color_id.into(),
        }
    }

    /// Returns `true` if this key matches the given identifier pair.
    #[must_use]
    pub fn matches(&self, plant_id: &str, color_id: &str) -> bool {
        self.plant_id == plant_id && self.color_id == color_id
    }
}

/// One physical instance of a placement, in garden coordinates (feet).
///
/// Coordinates are unconstrained: the model permits positions outside the
/// garden rectangle and preserves them verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate in feet from the garden origin.
    pub x: f64,
    /// Y coordinate in feet from the garden origin.
    pub y: f64,
}

impl Position {
    /// Creates a position from garden coordinates in feet.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One selected plant/color combination and its placed instances.
///
/// The position list is ordered by insertion; the index within the list is
/// the addressing key for [`GardenState::update_position`] and
/// [`GardenState::remove_position`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The selection key.
    #[serde(flatten)]
    pub key: PlacementKey,
    /// Optional niche identifier, used only for distinct-niche statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche_id: Option<String>,
    /// Placed instances in insertion order.
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// The root garden aggregate.
///
/// `GardenState` is plain data plus mutation primitives. Every mutator
/// returns `true` only when it actually changed something, and bumps the
/// [`revision`](Self::revision) counter in exactly those cases; callers such
/// as [`GardenStore`](crate::GardenStore) use the return value to decide
/// whether to persist and notify.
///
/// The serde shape of this type is the durable storage schema: a single JSON
/// object with `name`, `width`, `length`, `description`, optional
/// `garden_id`, and the `plants` list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GardenState {
    /// Display name of the garden.
    pub name: String,
    /// Garden width in feet.
    pub width: f64,
    /// Garden length in feet.
    pub length: f64,
    /// Free-form description, carried through save/load.
    #[serde(default)]
    pub description: String,
    /// Server-side identity, present once the garden has been saved remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garden_id: Option<String>,
    /// Selected placements in insertion order.
    #[serde(default)]
    pub plants: Vec<Placement>,
    #[serde(skip)]
    revision: u64,
}

impl Default for GardenState {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            width: DEFAULT_WIDTH,
            length: DEFAULT_LENGTH,
            description: String::new(),
            garden_id: None,
            plants: Vec::new(),
            revision: 0,
        }
    }
}

impl GardenState {
    /// Creates the default garden: "My Garden", 25 ft by 10 ft, no plants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current revision counter.
    ///
    /// The revision is monotonically increasing and local to this instance.
    /// It bumps exactly when a mutator changes the semantic contents, so
    /// observers can use it as a cheap "did anything change?" marker.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if a placement with this identifier pair is selected.
    #[must_use]
    pub fn is_selected(&self, plant_id: &str, color_id: &str) -> bool {
        self.placement(plant_id, color_id).is_some()
    }

    /// Returns the placement for this identifier pair, if selected.
    #[must_use]
    pub fn placement(&self, plant_id: &str, color_id: &str) -> Option<&Placement> {
        self.plants
            .iter()
            .find(|p| p.key.matches(plant_id, color_id))
    }

    /// Returns the positions of this placement, or an empty slice if the
    /// placement is not selected.
    #[must_use]
    pub fn positions(&self, plant_id: &str, color_id: &str) -> &[Position] {
        self.placement(plant_id, color_id)
            .map_or(&[], |p| p.positions.as_slice())
    }

    /// Number of selected placements (not placed instances).
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.plants.len()
    }

    /// Number of distinct non-empty niche identifiers across placements.
    #[must_use]
    pub fn unique_niche_count(&self) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for placement in &self.plants {
            if let Some(niche) = placement.niche_id.as_deref()
                && !niche.is_empty()
                && !seen.contains(&niche)
            {
                seen.push(niche);
            }
        }
        seen.len()
    }

    /// Toggles the placement for this identifier pair.
    ///
    /// If a placement with this key exists it is removed along with all of
    /// its positions; otherwise a new placement with an empty position list
    /// is inserted. Exactly one of insert/remove happens per call.
    ///
    /// Returns `true` if the pair is selected after the call.
    pub fn toggle_placement(
        &mut self,
        plant_id: &str,
        color_id: &str,
        niche_id: Option<&str>,
    ) -> bool {
        if let Some(idx) = self.position_of(plant_id, color_id) {
            self.plants.remove(idx);
            self.bump_revision();
            false
        } else {
            self.plants.push(Placement {
                key: PlacementKey::new(plant_id, color_id),
                niche_id: niche_id.map(str::to_owned),
                positions: Vec::new(),
            });
            self.bump_revision();
            true
        }
    }

    /// Appends a position to the matching placement.
    ///
    /// Returns the new position's index, or `None` when no placement with
    /// this key is selected (the caller must toggle the selection first).
    pub fn add_position(
        &mut self,
        plant_id: &str,
        color_id: &str,
        x: f64,
        y: f64,
    ) -> Option<usize> {
        let idx = self.position_of(plant_id, color_id)?;
        let positions = &mut self.plants[idx].positions;
        positions.push(Position::new(x, y));
        let new_index = positions.len() - 1;
        self.bump_revision();
        Some(new_index)
    }

    /// Overwrites the position at `index` for the matching placement.
    ///
    /// This is best-effort by design: a missing placement or an out-of-range
    /// index is silently ignored, since a position can be removed by a
    /// double-click delete while a drag on it is still in flight. Returns
    /// `true` only when a position was actually changed.
    pub fn update_position(
        &mut self,
        plant_id: &str,
        color_id: &str,
        index: usize,
        x: f64,
        y: f64,
    ) -> bool {
        let Some(idx) = self.position_of(plant_id, color_id) else {
            return false;
        };
        let Some(slot) = self.plants[idx].positions.get_mut(index) else {
            return false;
        };
        let next = Position::new(x, y);
        if *slot == next {
            return false;
        }
        *slot = next;
        self.bump_revision();
        true
    }

    /// Removes the position at `index`, shifting later indices down.
    ///
    /// Silently ignored when the placement or index is absent. Returns
    /// `true` when a position was removed.
    pub fn remove_position(&mut self, plant_id: &str, color_id: &str, index: usize) -> bool {
        let Some(idx) = self.position_of(plant_id, color_id) else {
            return false;
        };
        let positions = &mut self.plants[idx].positions;
        if index >= positions.len() {
            return false;
        }
        positions.remove(index);
        self.bump_revision();
        true
    }

    /// Sets the garden extents in feet.
    ///
    /// Non-finite or non-positive extents are rejected (the garden rectangle
    /// must have positive area). Returns `true` when the extents changed.
    pub fn set_dimensions(&mut self, width: f64, length: f64) -> bool {
        if !(width.is_finite() && length.is_finite() && width > 0.0 && length > 0.0) {
            return false;
        }
        if self.width == width && self.length == length {
            return false;
        }
        self.width = width;
        self.length = length;
        self.bump_revision();
        true
    }

    /// Sets the display name. Returns `true` when it changed.
    pub fn set_name(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_owned();
        self.bump_revision();
        true
    }

    /// Sets the description. Returns `true` when it changed.
    pub fn set_description(&mut self, description: &str) -> bool {
        if self.description == description {
            return false;
        }
        self.description = description.to_owned();
        self.bump_revision();
        true
    }

    /// Records the server-side identity after a successful save.
    ///
    /// Returns `true` when the stored identity changed.
    pub fn set_garden_id(&mut self, garden_id: &str) -> bool {
        if self.garden_id.as_deref() == Some(garden_id) {
            return false;
        }
        self.garden_id = Some(garden_id.to_owned());
        self.bump_revision();
        true
    }

    /// Resets to the default garden while keeping the revision monotone.
    pub fn reset(&mut self) {
        let revision = self.revision;
        *self = Self::default();
        self.revision = revision;
        self.bump_revision();
    }

    fn position_of(&self, plant_id: &str, color_id: &str) -> Option<usize> {
        self.plants
            .iter()
            .position(|p| p.key.matches(plant_id, color_id))
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_garden_matches_documented_defaults() {
        let garden = GardenState::new();
        assert_eq!(garden.name, "My Garden");
        assert_eq!(garden.width, 25.0);
        assert_eq!(garden.length, 10.0);
        assert!(garden.plants.is_empty());
        assert_eq!(garden.revision(), 0);
    }

    #[test]
    fn toggle_twice_round_trips_to_empty() {
        let mut garden = GardenState::new();

        assert!(garden.toggle_placement("p1", "c1", Some("n1")));
        garden.add_position("p1", "c1", 1.0, 2.0);
        garden.add_position("p1", "c1", 3.0, 4.0);
        assert_eq!(garden.positions("p1", "c1").len(), 2);

        assert!(!garden.toggle_placement("p1", "c1", Some("n1")));
        assert!(!garden.is_selected("p1", "c1"));
        assert!(garden.positions("p1", "c1").is_empty());
        assert_eq!(garden.total_count(), 0);
    }

    #[test]
    fn position_count_tracks_adds_minus_effective_removes() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);

        assert_eq!(garden.add_position("p1", "c1", 0.0, 0.0), Some(0));
        assert_eq!(garden.add_position("p1", "c1", 1.0, 0.0), Some(1));
        assert_eq!(garden.add_position("p1", "c1", 2.0, 0.0), Some(2));

        // One remove that hits, one that misses.
        assert!(garden.remove_position("p1", "c1", 1));
        assert!(!garden.remove_position("p1", "c1", 5));

        let positions = garden.positions("p1", "c1");
        assert_eq!(positions.len(), 2);
        // Remaining positions keep their original insertion order.
        assert_eq!(positions[0], Position::new(0.0, 0.0));
        assert_eq!(positions[1], Position::new(2.0, 0.0));
    }

    #[test]
    fn add_position_without_selection_is_refused() {
        let mut garden = GardenState::new();
        assert_eq!(garden.add_position("p1", "c1", 5.0, 5.0), None);
        assert_eq!(garden.revision(), 0);
    }

    #[test]
    fn update_past_end_is_a_no_op() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 1.0, 1.0);
        let revision = garden.revision();

        assert!(!garden.update_position("p1", "c1", 1, 9.0, 9.0));
        assert!(!garden.update_position("p2", "c2", 0, 9.0, 9.0));
        assert_eq!(garden.positions("p1", "c1"), &[Position::new(1.0, 1.0)]);
        assert_eq!(garden.revision(), revision);
    }

    #[test]
    fn update_in_range_overwrites() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.add_position("p1", "c1", 1.0, 1.0);

        assert!(garden.update_position("p1", "c1", 0, 7.0, 2.0));
        assert_eq!(garden.positions("p1", "c1"), &[Position::new(7.0, 2.0)]);
    }

    #[test]
    fn unique_niche_count_ignores_empty_and_duplicates() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", Some("shade"));
        garden.toggle_placement("p2", "c1", Some("shade"));
        garden.toggle_placement("p3", "c1", Some("border"));
        garden.toggle_placement("p4", "c1", Some(""));
        garden.toggle_placement("p5", "c1", None);

        assert_eq!(garden.total_count(), 5);
        assert_eq!(garden.unique_niche_count(), 2);
    }

    #[test]
    fn dimension_guard_rejects_degenerate_extents() {
        let mut garden = GardenState::new();
        assert!(!garden.set_dimensions(0.0, 10.0));
        assert!(!garden.set_dimensions(10.0, -1.0));
        assert!(!garden.set_dimensions(f64::NAN, 10.0));
        assert!(!garden.set_dimensions(25.0, 10.0));
        assert_eq!(garden.revision(), 0);

        assert!(garden.set_dimensions(12.0, 8.0));
        assert_eq!((garden.width, garden.length), (12.0, 8.0));
    }

    #[test]
    fn revision_bumps_only_on_semantic_change() {
        let mut garden = GardenState::new();
        assert!(garden.set_name("Front bed"));
        let revision = garden.revision();

        assert!(!garden.set_name("Front bed"));
        assert!(!garden.set_description(""));
        assert!(!garden.update_position("p1", "c1", 0, 0.0, 0.0));
        assert_eq!(garden.revision(), revision);
    }

    #[test]
    fn reset_restores_defaults_and_keeps_revision_monotone() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", None);
        garden.set_garden_id("abc");
        let revision = garden.revision();

        garden.reset();
        assert_eq!(garden.total_count(), 0);
        assert_eq!(garden.garden_id, None);
        assert!(garden.revision() > revision);
    }

    #[test]
    fn durable_shape_round_trips_through_json() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", Some("n1"));
        garden.add_position("p1", "c1", 2.5, 1.0);

        let blob = serde_json::to_string(&garden).unwrap();
        let restored: GardenState = serde_json::from_str(&blob).unwrap();

        assert_eq!(restored.name, garden.name);
        assert_eq!(restored.plants, garden.plants);
        // Revision is transient and restarts from zero.
        assert_eq!(restored.revision(), 0);
    }

    #[test]
    fn durable_shape_uses_flattened_keys() {
        let mut garden = GardenState::new();
        garden.toggle_placement("p1", "c1", Some("n1"));
        garden.add_position("p1", "c1", 2.5, 1.0);

        let value = serde_json::to_value(&garden).unwrap();
        let plant = &value["plants"][0];
        assert_eq!(plant["plant_id"], "p1");
        assert_eq!(plant["color_id"], "c1");
        assert_eq!(plant["niche_id"], "n1");
        assert_eq!(plant["positions"][0]["x"], 2.5);
    }
}
