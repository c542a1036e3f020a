// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Canvas: the spatial layout engine of the garden planner.
//!
//! This crate turns a garden state plus resolved catalog records into a
//! drawable, hit-testable scene, and tracks the pointer interactions that
//! rearrange it. It owns no state of its own beyond the transient drag; the
//! durable model lives in `floret_garden` and the record cache in
//! `floret_catalog`.
//!
//! The pieces are:
//!
//! - [`PlanViewport`]: the per-draw mapping between garden space (feet) and
//!   view space (pixels): a uniform fit of the garden rectangle into the
//!   view with a 10% margin, centered. Rebuilt on every draw, since garden
//!   dimensions can change between draws.
//! - [`Scene`] / [`build_scene`]: one [`PlantMark`] per placed instance that
//!   has a resolved record, in insertion order (so the last-drawn mark is
//!   visually topmost), styled for the active [`ViewMode`]. Placements the
//!   cache cannot resolve are skipped, never an error.
//! - [`Scene::hit_test`]: reverse-order circle test, so overlapping marks
//!   resolve to the topmost one.
//! - [`DragController`]: the Idle ⇄ Dragging state machine. The grab keeps
//!   the pointer-to-center offset so a plant never snaps to the cursor, the
//!   live position stays transient until the drop, and the drop is yielded
//!   exactly once.
//!
//! ## Minimal example
//!
//! ```rust
//! use floret_canvas::{PlanViewport, ViewMode, build_scene};
//! use floret_catalog::{PlantRecord, RecordLookup, Rgb8};
//! use floret_garden::{GardenState, PlacementKey};
//! use kurbo::{Point, Size};
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
//! garden.add_position("p1", "c1", 12.5, 5.0);
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
//!     bloom: vec!["jul".into()],
//!     features: vec![],
//! });
//!
//! let viewport = PlanViewport::fit(
//!     Size::new(800.0, 600.0),
//!     Size::new(garden.width, garden.length),
//! );
//! let scene = build_scene(&garden, &records, &viewport, ViewMode::Bloom, None);
//! assert_eq!(scene.marks.len(), 1);
//!
//! // The instance sits at the garden center, so it must be hittable there.
//! let center = viewport.garden_to_view(Point::new(12.5, 5.0));
//! assert!(scene.hit_test(center).is_some());
//! ```

mod color;
mod drag;
mod scene;
mod viewport;

pub use color::{
    BLOOM_FILL_ALPHA, TOPO_MAX_HEIGHT, bloom_fill, bloom_stroke, label_halo, topographic_fill,
};
pub use drag::{DragController, DragDrop, DragGrab};
pub use scene::{MarkLabel, PlantMark, Scene, ViewMode, build_scene};
pub use viewport::{FIT_MARGIN, PlanViewport};
