// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Garden: the durable state model of a planned garden.
//!
//! This crate owns the canonical representation of a user's garden: its name
//! and dimensions, the set of selected plant/color combinations
//! ([`Placement`]s), and the physical instances of each combination placed on
//! the plan ([`Position`]s). It knows nothing about rendering, catalogs, or
//! networks; those live in sibling crates and observe this one.
//!
//! The core types are:
//!
//! - [`GardenState`]: the root aggregate with in-place mutation primitives.
//!   Every mutator reports whether it actually changed anything, and a
//!   monotonically increasing [`GardenState::revision`] counter bumps on each
//!   semantic change so observers can cheaply detect staleness.
//! - [`GardenStore`]: wraps a [`GardenState`] together with a durable
//!   [`Storage`] backend and a list of change observers. Every store-level
//!   mutation that changes the state persists it synchronously and then
//!   notifies observers.
//!
//! ## Minimal example
//!
//! ```rust
//! use floret_garden::{GardenStore, MemoryStorage};
//!
//! let mut store = GardenStore::open(MemoryStorage::new());
//!
//! // Select a plant/color combination.
//! store.toggle_placement("p1", "c1", Some("n1"));
//! assert!(store.state().is_selected("p1", "c1"));
//! assert_eq!(store.state().total_count(), 1);
//!
//! // Place one instance of it at garden coordinates (5, 5), in feet.
//! let index = store.add_position("p1", "c1", 5.0, 5.0);
//! assert_eq!(index, Some(0));
//!
//! // Toggling again removes the placement and all of its positions.
//! store.toggle_placement("p1", "c1", Some("n1"));
//! assert_eq!(store.state().total_count(), 0);
//! ```
//!
//! ## Concepts
//!
//! A **placement** is one selected plant/color combination, keyed by the
//! composite [`PlacementKey`]. Selection is independent of physical layout: a
//! placement may have zero positions (selected but not yet placed) or many.
//! A **position** is one physical occurrence of a placement at garden
//! coordinates, addressed by its insertion index within the placement.
//!
//! Positions are deliberately never clamped to the garden rectangle; callers
//! may place or drag instances outside the bounds and the model preserves the
//! coordinates verbatim.
//!
//! ## Durability and failure policy
//!
//! The garden is serialized as a single JSON blob under the fixed key
//! [`STORAGE_KEY`]. A missing or malformed blob is treated identically to
//! absence: [`GardenStore::open`] falls back to the default garden and never
//! reports an error. Storage write failures are logged via the [`log`] facade
//! and swallowed; the in-memory state remains the source of truth.

mod state;
mod store;

pub use state::{GardenState, Placement, PlacementKey, Position};
pub use store::{GardenStore, MemoryStorage, STORAGE_KEY, Storage, StorageError};
