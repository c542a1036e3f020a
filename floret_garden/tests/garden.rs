// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end exercises of the `floret_garden` store: the selection/placement
//! lifecycle, persistence round-trips, and observer behavior.

use floret_garden::{GardenStore, MemoryStorage, Position};

#[test]
fn full_selection_and_placement_scenario() {
    let mut store = GardenStore::open(MemoryStorage::new());

    // Fresh garden.
    assert_eq!(store.state().width, 25.0);
    assert_eq!(store.state().length, 10.0);
    assert!(store.state().plants.is_empty());

    // Select one plant/color combination.
    store.toggle_placement("p1", "c1", Some("n1"));
    assert_eq!(store.state().total_count(), 1);
    assert_eq!(store.state().unique_niche_count(), 1);

    // Place an instance.
    assert_eq!(store.add_position("p1", "c1", 5.0, 5.0), Some(0));
    assert_eq!(store.state().positions("p1", "c1"), &[Position::new(5.0, 5.0)]);

    // Drag it somewhere else.
    store.update_position("p1", "c1", 0, 7.0, 2.0);
    assert_eq!(store.state().positions("p1", "c1"), &[Position::new(7.0, 2.0)]);

    // Double-click delete.
    store.remove_position("p1", "c1", 0);
    assert!(store.state().positions("p1", "c1").is_empty());

    // Deselect entirely.
    store.toggle_placement("p1", "c1", Some("n1"));
    assert_eq!(store.state().total_count(), 0);
}

#[test]
fn observers_see_each_persisting_mutation_in_order() {
    let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = log.clone();

    let mut store = GardenStore::open(MemoryStorage::new());
    store.observe(move |state| sink.borrow_mut().push(state.total_count()));

    store.toggle_placement("p1", "c1", None);
    store.toggle_placement("p2", "c1", None);
    store.toggle_placement("p1", "c1", None);

    assert_eq!(log.borrow().as_slice(), &[1, 2, 1]);
}

#[test]
fn stale_drag_end_after_delete_is_benign() {
    let mut store = GardenStore::open(MemoryStorage::new());
    store.toggle_placement("p1", "c1", None);
    store.add_position("p1", "c1", 1.0, 1.0);

    // A delete lands while a drag on index 0 is still in flight.
    store.remove_position("p1", "c1", 0);

    // The drag-end write targets a now-stale index and is ignored.
    store.update_position("p1", "c1", 0, 9.0, 9.0);
    assert!(store.state().positions("p1", "c1").is_empty());
}

#[test]
fn garden_id_survives_reopen() {
    let mut store = GardenStore::open(MemoryStorage::new());
    store.set_garden_id("7c9e6679-7425-40de-944b-e07fc1f90ae7");

    let reopened = GardenStore::open(store.into_storage());
    assert_eq!(
        reopened.state().garden_id.as_deref(),
        Some("7c9e6679-7425-40de-944b-e07fc1f90ae7")
    );
}
