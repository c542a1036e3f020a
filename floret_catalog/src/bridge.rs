// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The resolve transport trait and the in-memory record cache.

use core::fmt;

use floret_garden::PlacementKey;
use hashbrown::HashMap;

use crate::record::PlantRecord;
use crate::wire::{decode_resolve_response, encode_resolve_request};

/// Transport-level failure of a catalog lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceError {
    reason: String,
}

impl SourceError {
    /// Creates an error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
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

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catalog lookup failed: {}", self.reason)
    }
}

impl std::error::Error for SourceError {}

/// Transport for the batched catalog lookup.
///
/// Implementations send the already-encoded request body to the catalog
/// service and return the raw response body; decoding and validation stay in
/// this crate. The HTTP implementation lives in `floret_http`; tests use
/// canned sources.
pub trait CatalogSource {
    /// Performs one batched lookup, returning the raw response body.
    fn resolve(&mut self, request: &str) -> Result<String, SourceError>;
}

/// Read access to resolved records.
///
/// This is the seam consumed by scene construction and card filtering; both
/// a [`CatalogBridge`] and a bare map of records satisfy it, so rendering
/// code can be tested without any transport at all.
pub trait RecordLookup {
    /// Returns the resolved record for `key`, if the cache has one.
    fn record(&self, key: &PlacementKey) -> Option<&PlantRecord>;
}

impl RecordLookup for HashMap<PlacementKey, PlantRecord> {
    fn record(&self, key: &PlacementKey) -> Option<&PlantRecord> {
        self.get(key)
    }
}

/// Counters describing one [`CatalogBridge::refresh`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Records decoded and merged into the cache.
    pub resolved: usize,
    /// Response entries dropped by validation.
    pub rejected: usize,
}

/// The catalog bridge: a transport plus a monotone key→record cache.
///
/// `refresh` always re-resolves the full key set it is given (no incremental
/// fetch) and merges the results last-writer-wins per key. Failures never
/// clear the cache: a stale record is strictly more useful than no record,
/// and the values for a given key are immutable catalog facts.
#[derive(Debug)]
pub struct CatalogBridge<S> {
    source: S,
    records: HashMap<PlacementKey, PlantRecord>,
}

impl<S> CatalogBridge<S> {
    /// Creates a bridge with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            records: HashMap::new(),
        }
    }

    /// Returns the resolved record for `key`, if any.
    #[must_use]
    pub fn record(&self, key: &PlacementKey) -> Option<&PlantRecord> {
        self.records.get(key)
    }

    /// Number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been resolved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all cached records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<S: CatalogSource> CatalogBridge<S> {
    /// Re-resolves the given key set and merges the results into the cache.
    ///
    /// An empty key set performs no lookup at all. Transport failures,
    /// malformed bodies, and unsuccessful replies are logged and leave the
    /// cache untouched; individually rejected entries are logged at debug
    /// level and counted in the returned summary.
    pub fn refresh<'a>(
        &mut self,
        keys: impl IntoIterator<Item = &'a PlacementKey>,
    ) -> RefreshSummary {
        let keys: Vec<PlacementKey> = keys.into_iter().cloned().collect();
        if keys.is_empty() {
            return RefreshSummary::default();
        }

        let request = encode_resolve_request(&keys);
        let body = match self.source.resolve(&request) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("{err}; keeping {} cached records", self.records.len());
                return RefreshSummary::default();
            }
        };

        let outcome = match decode_resolve_response(&body) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("{err}; keeping {} cached records", self.records.len());
                return RefreshSummary::default();
            }
        };

        for rejected in &outcome.rejected {
            log::debug!(
                "dropping catalog entry {} ({:?}): {}",
                rejected.index,
                rejected.key,
                rejected.reason
            );
        }

        let summary = RefreshSummary {
            resolved: outcome.records.len(),
            rejected: outcome.rejected.len(),
        };
        for record in outcome.records {
            self.records.insert(record.key.clone(), record);
        }
        summary
    }
}

impl<S> RecordLookup for CatalogBridge<S> {
    fn record(&self, key: &PlacementKey) -> Option<&PlantRecord> {
        self.records.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that replays a scripted sequence of results.
    struct Scripted {
        replies: Vec<Result<String, SourceError>>,
        requests: Vec<String>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String, SourceError>>) -> Self {
            Self {
                replies,
                requests: Vec::new(),
            }
        }
    }

    impl CatalogSource for Scripted {
        fn resolve(&mut self, request: &str) -> Result<String, SourceError> {
            self.requests.push(request.to_owned());
            self.replies.remove(0)
        }
    }

    fn record_body(pairs: &[(&str, &str, &str)]) -> String {
        let plants: Vec<serde_json::Value> = pairs
            .iter()
            .map(|(plant, color, name)| {
                serde_json::json!({
                    "plant_id": plant,
                    "color_id": color,
                    "common_name": name,
                    "color_hex": "#336633"
                })
            })
            .collect();
        serde_json::json!({ "success": true, "plants": plants }).to_string()
    }

    #[test]
    fn refresh_populates_and_reports() {
        let source = Scripted::new(vec![Ok(record_body(&[
            ("p1", "c1", "Coneflower"),
            ("p2", "c2", "Bee Balm"),
        ]))]);
        let mut bridge = CatalogBridge::new(source);

        let keys = [PlacementKey::new("p1", "c1"), PlacementKey::new("p2", "c2")];
        let summary = bridge.refresh(keys.iter());

        assert_eq!(summary, RefreshSummary { resolved: 2, rejected: 0 });
        assert_eq!(bridge.len(), 2);
        assert_eq!(bridge.record(&keys[0]).unwrap().common_name, "Coneflower");
    }

    #[test]
    fn empty_key_set_skips_the_lookup() {
        let source = Scripted::new(vec![]);
        let mut bridge = CatalogBridge::new(source);
        assert_eq!(bridge.refresh([]), RefreshSummary::default());
    }

    #[test]
    fn transport_failure_keeps_stale_cache() {
        let key = PlacementKey::new("p1", "c1");
        let source = Scripted::new(vec![
            Ok(record_body(&[("p1", "c1", "Coneflower")])),
            Err(SourceError::new("connection refused")),
        ]);
        let mut bridge = CatalogBridge::new(source);

        bridge.refresh([&key]);
        assert_eq!(bridge.len(), 1);

        let summary = bridge.refresh([&key]);
        assert_eq!(summary, RefreshSummary::default());
        assert_eq!(
            bridge.record(&key).unwrap().common_name,
            "Coneflower",
            "stale record should survive a failed refresh"
        );
    }

    #[test]
    fn unsuccessful_reply_keeps_stale_cache() {
        let key = PlacementKey::new("p1", "c1");
        let source = Scripted::new(vec![
            Ok(record_body(&[("p1", "c1", "Coneflower")])),
            Ok(r#"{"success": false, "plants": []}"#.to_owned()),
        ]);
        let mut bridge = CatalogBridge::new(source);

        bridge.refresh([&key]);
        bridge.refresh([&key]);
        assert_eq!(bridge.len(), 1);
    }

    #[test]
    fn merge_is_last_writer_wins_per_key() {
        let key = PlacementKey::new("p1", "c1");
        let source = Scripted::new(vec![
            Ok(record_body(&[("p1", "c1", "Old Name")])),
            Ok(record_body(&[("p1", "c1", "New Name")])),
        ]);
        let mut bridge = CatalogBridge::new(source);

        bridge.refresh([&key]);
        bridge.refresh([&key]);
        assert_eq!(bridge.len(), 1);
        assert_eq!(bridge.record(&key).unwrap().common_name, "New Name");
    }

    #[test]
    fn request_carries_the_full_key_set() {
        let source = Scripted::new(vec![Ok(record_body(&[]))]);
        let mut bridge = CatalogBridge::new(source);
        let keys = [PlacementKey::new("p1", "c1"), PlacementKey::new("p2", "c2")];
        bridge.refresh(keys.iter());

        let sent: serde_json::Value =
            serde_json::from_str(&bridge.source.requests[0]).unwrap();
        assert_eq!(sent["plants"].as_array().unwrap().len(), 2);
    }
}
