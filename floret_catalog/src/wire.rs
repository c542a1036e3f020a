// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire format of the batched catalog lookup, with per-entry validation.

use core::fmt;

use floret_garden::PlacementKey;
use serde::Deserialize;

use crate::record::{PlantFeature, PlantRecord, Rgb8};

/// Encodes the batched lookup request: `{"plants": [{"plant_id", "color_id"}, …]}`.
#[must_use]
pub fn encode_resolve_request(keys: &[PlacementKey]) -> String {
    serde_json::json!({ "plants": keys }).to_string()
}

/// Error decoding a resolve response as a whole.
///
/// Per-entry problems are not errors at this level; they surface as
/// [`RejectedRecord`]s in the [`ResolveOutcome`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The body was not the expected JSON shape.
    Malformed(String),
    /// The service reported `success: false` (or omitted the flag).
    Unsuccessful,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed catalog response: {reason}"),
            Self::Unsuccessful => write!(f, "catalog reported an unsuccessful lookup"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// One response entry that failed validation.
///
/// The entry is dropped; everything decodable about its identity is kept so
/// the failure can be logged against a concrete selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Index of the entry within the response `plants` array.
    pub index: usize,
    /// The selection the entry claimed to describe, when that much decoded.
    pub key: Option<PlacementKey>,
    /// Why the entry was rejected.
    pub reason: String,
}

/// Result of decoding a successful resolve response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolveOutcome {
    /// Fully-validated records.
    pub records: Vec<PlantRecord>,
    /// Entries dropped by validation.
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    plants: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct WireRecord {
    plant_id: String,
    color_id: String,
    common_name: String,
    #[serde(default)]
    scientific_name: String,
    #[serde(default)]
    color_name: String,
    color_hex: String,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    spread: Option<f64>,
    #[serde(default)]
    niche_id: Option<String>,
    #[serde(default)]
    niche_name: Option<String>,
    #[serde(default)]
    native: bool,
    #[serde(default)]
    bloom: Vec<String>,
    #[serde(default)]
    features: Vec<WireFeature>,
}

#[derive(Deserialize)]
struct WireFeature {
    id: String,
    name: String,
    #[serde(default)]
    icon: Option<String>,
}

/// Decodes and validates a resolve response body.
///
/// The body must parse as `{"success": bool, "plants": […]}` with `success`
/// true; otherwise the whole response is rejected. Each entry is then
/// validated independently: required fields must be present, the bloom color
/// must be a six-digit hex string, and height/spread must be finite and
/// non-negative when present. Invalid entries land in
/// [`ResolveOutcome::rejected`] without affecting their neighbors.
pub fn decode_resolve_response(body: &str) -> Result<ResolveOutcome, ResolveError> {
    let response: WireResponse =
        serde_json::from_str(body).map_err(|err| ResolveError::Malformed(err.to_string()))?;
    if !response.success {
        return Err(ResolveError::Unsuccessful);
    }

    let mut outcome = ResolveOutcome::default();
    for (index, value) in response.plants.into_iter().enumerate() {
        // Keep whatever identity is recoverable for failure reporting before
        // the strict decode consumes the value.
        let claimed_key = claimed_key(&value);
        match serde_json::from_value::<WireRecord>(value) {
            Ok(wire) => match validate(wire) {
                Ok(record) => outcome.records.push(record),
                Err((key, reason)) => outcome.rejected.push(RejectedRecord {
                    index,
                    key: Some(key),
                    reason,
                }),
            },
            Err(err) => outcome.rejected.push(RejectedRecord {
                index,
                key: claimed_key,
                reason: err.to_string(),
            }),
        }
    }
    Ok(outcome)
}

fn claimed_key(value: &serde_json::Value) -> Option<PlacementKey> {
    let plant_id = value.get("plant_id")?.as_str()?;
    let color_id = value.get("color_id")?.as_str()?;
    Some(PlacementKey::new(plant_id, color_id))
}

fn validate(wire: WireRecord) -> Result<PlantRecord, (PlacementKey, String)> {
    let key = PlacementKey::new(wire.plant_id, wire.color_id);

    let Some(color) = Rgb8::from_hex(&wire.color_hex) else {
        return Err((key, format!("invalid color_hex {:?}", wire.color_hex)));
    };
    for (field, value) in [("height", wire.height), ("spread", wire.spread)] {
        if let Some(v) = value
            && !(v.is_finite() && v >= 0.0)
        {
            return Err((key, format!("invalid {field} {v}")));
        }
    }

    Ok(PlantRecord {
        key,
        common_name: wire.common_name,
        scientific_name: wire.scientific_name,
        color_name: wire.color_name,
        color,
        height: wire.height,
        spread: wire.spread,
        niche_id: wire.niche_id,
        niche_name: wire.niche_name,
        native: wire.native,
        bloom: wire.bloom,
        features: wire
            .features
            .into_iter()
            .map(|f| PlantFeature {
                id: f.id,
                name: f.name,
                icon: f.icon,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(overrides: &[(&str, serde_json::Value)]) -> serde_json::Value {
        let mut value = serde_json::json!({
            "plant_id": "p1",
            "color_id": "c1",
            "common_name": "Purple Coneflower",
            "scientific_name": "Echinacea purpurea",
            "color_name": "Purple",
            "color_hex": "#8a2be2",
            "height": 3.0,
            "spread": 1.5,
            "niche_id": "n1",
            "niche_name": "Pollinator",
            "native": true,
            "bloom": ["jun", "jul"],
            "features": [{"id": "f1", "name": "Attracts Pollinators", "icon": null}]
        });
        for (field, v) in overrides {
            value[*field] = v.clone();
        }
        value
    }

    fn body(plants: Vec<serde_json::Value>) -> String {
        serde_json::json!({ "success": true, "plants": plants }).to_string()
    }

    #[test]
    fn request_shape_matches_contract() {
        let keys = [PlacementKey::new("p1", "c1"), PlacementKey::new("p2", "c9")];
        let encoded = encode_resolve_request(&keys);
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["plants"][0]["plant_id"], "p1");
        assert_eq!(value["plants"][1]["color_id"], "c9");
    }

    #[test]
    fn well_formed_entry_decodes_fully() {
        let outcome = decode_resolve_response(&body(vec![entry(&[])])).unwrap();
        assert!(outcome.rejected.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.key, PlacementKey::new("p1", "c1"));
        assert_eq!(record.color, Rgb8::new(0x8a, 0x2b, 0xe2));
        assert_eq!(record.bloom, vec!["jun", "jul"]);
        assert_eq!(record.features[0].name, "Attracts Pollinators");
        assert!(record.native);
    }

    #[test]
    fn missing_optionals_fall_back_to_defaults() {
        let minimal = serde_json::json!({
            "plant_id": "p1",
            "color_id": "c1",
            "common_name": "Mystery",
            "color_hex": "#112233"
        });
        let outcome = decode_resolve_response(&body(vec![minimal])).unwrap();
        let record = &outcome.records[0];
        assert_eq!(record.height, None);
        assert_eq!(record.spread, None);
        assert!(!record.native);
        assert!(record.bloom.is_empty());
    }

    #[test]
    fn bad_entries_are_rejected_individually() {
        let plants = vec![
            entry(&[]),
            entry(&[("color_hex", serde_json::json!("teal"))]),
            entry(&[("common_name", serde_json::json!(null))]),
            entry(&[("height", serde_json::json!(-2.0))]),
        ];
        let outcome = decode_resolve_response(&body(plants)).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.rejected.len(), 3);
        assert_eq!(outcome.rejected[0].index, 1);
        assert_eq!(
            outcome.rejected[1].key,
            Some(PlacementKey::new("p1", "c1")),
            "identity should be recovered even when strict decode fails"
        );
        assert!(outcome.rejected[2].reason.contains("height"));
    }

    #[test]
    fn unsuccessful_flag_rejects_the_response() {
        let body = r#"{"success": false, "plants": []}"#;
        assert_eq!(
            decode_resolve_response(body),
            Err(ResolveError::Unsuccessful)
        );

        // An absent flag is treated the same as false.
        assert_eq!(
            decode_resolve_response(r#"{"plants": []}"#),
            Err(ResolveError::Unsuccessful)
        );
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            decode_resolve_response("<html>502</html>"),
            Err(ResolveError::Malformed(_))
        ));
    }
}
