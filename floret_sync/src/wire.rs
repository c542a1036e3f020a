// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire formats of the save, load, and list endpoints.
//!
//! Positions travel as `[x, y]` coordinate pairs on the wire (matching the
//! server's contract), while the durable client blob stores them as `{x, y}`
//! objects; the conversion lives entirely in this module.

use core::fmt;

use floret_garden::GardenState;
use serde::Deserialize;

/// Error decoding a load or list response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    reason: String,
}

impl DecodeError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed garden payload: {}", self.reason)
    }
}

impl std::error::Error for DecodeError {}

/// Encodes the full garden as the save endpoint's request body.
///
/// Shape: `{"name", "width", "length", "description",
/// "plants": [{"plant_id", "color_id", "positions": [[x, y], …]}]}`.
#[must_use]
pub fn encode_save_request(state: &GardenState) -> String {
    let plants: Vec<serde_json::Value> = state
        .plants
        .iter()
        .map(|placement| {
            let positions: Vec<[f64; 2]> =
                placement.positions.iter().map(|p| [p.x, p.y]).collect();
            serde_json::json!({
                "plant_id": placement.key.plant_id,
                "color_id": placement.key.color_id,
                "positions": positions,
            })
        })
        .collect();
    serde_json::json!({
        "name": state.name,
        "width": state.width,
        "length": state.length,
        "description": state.description,
        "plants": plants,
    })
    .to_string()
}

#[derive(Deserialize)]
struct WireGarden {
    name: String,
    width: f64,
    length: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    plants: Vec<WirePlant>,
}

#[derive(Deserialize)]
struct WirePlant {
    plant_id: String,
    color_id: String,
    #[serde(default)]
    positions: Vec<[f64; 2]>,
}

/// Decodes a load-endpoint response into a garden state.
///
/// The result is built through the state's own mutation primitives, so the
/// usual invariants hold: duplicate plant/color pairs are collapsed to one
/// placement, and degenerate dimensions are rejected. The server stores no
/// niche information, so adopted placements carry none until the next
/// catalog refresh supplies it for display.
pub fn decode_garden(body: &str, garden_id: Option<&str>) -> Result<GardenState, DecodeError> {
    let wire: WireGarden =
        serde_json::from_str(body).map_err(|err| DecodeError::new(err.to_string()))?;

    let mut state = GardenState::new();
    if !state.set_dimensions(wire.width, wire.length) {
        return Err(DecodeError::new(format!(
            "unusable dimensions {} x {}",
            wire.width, wire.length
        )));
    }
    state.set_name(&wire.name);
    state.set_description(&wire.description);
    if let Some(id) = garden_id {
        state.set_garden_id(id);
    }

    for plant in wire.plants {
        if state.is_selected(&plant.plant_id, &plant.color_id) {
            log::debug!(
                "collapsing duplicate remote placement {}/{}",
                plant.plant_id,
                plant.color_id
            );
        } else {
            state.toggle_placement(&plant.plant_id, &plant.color_id, None);
        }
        for [x, y] in plant.positions {
            state.add_position(&plant.plant_id, &plant.color_id, x, y);
        }
    }
    Ok(state)
}

/// One entry of the garden list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GardenSummary {
    /// Server identity of the garden.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp, as the server formatted it.
    pub created_at: String,
    /// Number of placements in the garden.
    pub plant_count: u64,
}

#[derive(Deserialize)]
struct WireGardenList {
    #[serde(default)]
    gardens: Vec<GardenSummary>,
}

/// Decodes the list-endpoint response.
pub fn decode_garden_list(body: &str) -> Result<Vec<GardenSummary>, DecodeError> {
    let wire: WireGardenList =
        serde_json::from_str(body).map_err(|err| DecodeError::new(err.to_string()))?;
    Ok(wire.gardens)
}
