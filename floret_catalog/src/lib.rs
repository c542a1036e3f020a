// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Catalog: resolving selections into displayable plant records.
//!
//! The garden state stores only opaque `(plant_id, color_id)` pairs; this
//! crate turns those pairs into full [`PlantRecord`] values (name, bloom
//! color, height, spread, niche) by querying an external catalog service
//! through the [`CatalogSource`] transport trait and caching the results in
//! memory for the lifetime of the session.
//!
//! The catalog response is untrusted input. Decoding is a validation step:
//! each entry either becomes a fully-shaped [`PlantRecord`] or is rejected
//! individually with a typed [`RejectedRecord`]; a partially-shaped record
//! never escapes this crate. Transport failures, malformed bodies, and
//! unsuccessful replies all degrade the same way: the cache is left as-is
//! (stale or empty), the failure is logged, and the caller's draw loop simply
//! skips what it cannot resolve.
//!
//! ## Minimal example
//!
//! ```rust
//! use floret_catalog::{CatalogBridge, CatalogSource, RecordLookup, SourceError};
//! use floret_garden::PlacementKey;
//!
//! struct Canned;
//!
//! impl CatalogSource for Canned {
//!     fn resolve(&mut self, _request: &str) -> Result<String, SourceError> {
//!         Ok(r##"{"success": true, "plants": [{
//!             "plant_id": "p1", "color_id": "c1",
//!             "common_name": "Purple Coneflower",
//!             "scientific_name": "Echinacea purpurea",
//!             "color_name": "Purple", "color_hex": "#8a2be2",
//!             "height": 3.0, "spread": 1.5, "native": true,
//!             "bloom": ["jun", "jul", "aug"], "features": []
//!         }]}"##
//!             .to_owned())
//!     }
//! }
//!
//! let mut bridge = CatalogBridge::new(Canned);
//! let key = PlacementKey::new("p1", "c1");
//! let summary = bridge.refresh([&key]);
//! assert_eq!(summary.resolved, 1);
//!
//! let record = bridge.record(&key).unwrap();
//! assert_eq!(record.common_name, "Purple Coneflower");
//! assert_eq!(record.spread, Some(1.5));
//! ```
//!
//! ## Re-resolution policy
//!
//! [`CatalogBridge::refresh`] always performs one batched lookup of the full
//! key set; there is no incremental fetch. Decoded records are merged into
//! the cache with last-writer-wins per key, which is safe because catalog
//! facts for a given key are immutable, so a late-arriving reply from a
//! superseded refresh cannot corrupt anything.

mod bridge;
mod record;
mod wire;

pub use bridge::{CatalogBridge, CatalogSource, RecordLookup, RefreshSummary, SourceError};
pub use record::{PlantFeature, PlantRecord, Rgb8};
pub use wire::{
    RejectedRecord, ResolveError, ResolveOutcome, decode_resolve_response, encode_resolve_request,
};
