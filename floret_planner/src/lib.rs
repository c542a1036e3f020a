// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Planner: the interactive session over a garden.
//!
//! [`PlannerSession`] composes the sibling crates into one surface driven by
//! discrete UI events: pointer gestures on the canvas, card actions, input
//! edits, and the explicit save. It is the embodiment of the planner's
//! single-writer model: every state mutation happens inside one of its
//! event entry points, on one thread, so the garden state needs no locking
//! discipline at all.
//!
//! Event flow:
//!
//! 1. A pointer or card event arrives in view coordinates.
//! 2. The session converts it to garden space via a freshly fitted
//!    [`PlanViewport`], hit-tests the current [`Scene`], and applies the
//!    appropriate mutation to the [`GardenStore`] (which persists and
//!    notifies observers).
//! 3. The host redraws by asking for [`PlannerSession::scene`] again.
//!
//! Catalog resolution is a full re-resolve of the current selections,
//! triggered when a selection is added and after a remote garden is adopted;
//! the scene silently skips anything unresolved, so a slow or failing
//! catalog degrades the display without ever failing an event.

mod session;

pub use floret_canvas::{PlanViewport, Scene, ViewMode};
pub use floret_cards::{FilterBounds, PlantCard};
pub use session::PlannerSession;

// The session's event surface hands these types straight through; re-export
// them so hosts only need this crate for the common paths.
pub use floret_catalog::RefreshSummary;
pub use floret_garden::{GardenState, GardenStore};
pub use floret_sync::{SaveReceipt, SyncError};
