// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The planner session: event entry points over the composed subsystems.

use floret_canvas::{DragController, PlanViewport, Scene, ViewMode, build_scene};
use floret_cards::{FilterBounds, PlantCard, visible_cards};
use floret_catalog::{CatalogBridge, CatalogSource, RefreshSummary};
use floret_garden::{GardenState, GardenStore, Storage};
use floret_sync::{
    GardenGateway, SaveEndpoint, SaveReceipt, SyncError, fetch_garden, push_garden,
};
use kurbo::{Point, Size};

/// One user's interactive planning session.
///
/// The session owns the garden store (durable state), the catalog bridge
/// (record cache), the drag controller (transient gesture state), and the
/// display mode. All methods take `&mut self`; hosts call them from their
/// event callbacks one at a time.
#[derive(Debug)]
pub struct PlannerSession<S, C> {
    store: GardenStore<S>,
    catalog: CatalogBridge<C>,
    drag: DragController,
    mode: ViewMode,
    view: Size,
}

impl<S: Storage, C: CatalogSource> PlannerSession<S, C> {
    /// Opens a session: loads durable state and resolves its selections.
    ///
    /// The initial resolve means a garden restored from a previous visit can
    /// render immediately; if it fails, the scene starts empty and recovers
    /// on the next refresh.
    pub fn new(storage: S, source: C) -> Self {
        let store = GardenStore::open(storage);
        let mut session = Self {
            store,
            catalog: CatalogBridge::new(source),
            drag: DragController::new(),
            mode: ViewMode::default(),
            view: Size::ZERO,
        };
        session.refresh_catalog();
        session
    }

    /// The current garden state.
    #[must_use]
    pub fn state(&self) -> &GardenState {
        self.store.state()
    }

    /// The underlying store, for observer registration.
    pub fn store_mut(&mut self) -> &mut GardenStore<S> {
        &mut self.store
    }

    /// The active render mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Sets the render mode.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Switches between bloom and topographic rendering.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Records the canvas size in pixels; the next draw fits to it.
    pub fn set_view_size(&mut self, view: Size) {
        self.view = view;
    }

    /// The viewport fitting the garden into the current canvas size.
    ///
    /// Rebuilt on every call, never cached: garden dimensions may have
    /// changed since the last draw.
    #[must_use]
    pub fn viewport(&self) -> PlanViewport {
        let state = self.store.state();
        PlanViewport::fit(self.view, Size::new(state.width, state.length))
    }

    /// Builds the drawable scene for the current state, mode, and drag.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(
            self.store.state(),
            &self.catalog,
            &self.viewport(),
            self.mode,
            self.drag.grab(),
        )
    }

    /// Pointer press in view coordinates. Returns `true` when an instance
    /// was picked up.
    pub fn pointer_down(&mut self, pt: Point) -> bool {
        let viewport = self.viewport();
        let scene = self.scene();
        let Some(mark) = scene.hit_test(pt) else {
            return false;
        };
        self.drag.begin(
            mark.key.clone(),
            mark.position_index,
            viewport.view_to_garden(mark.center),
            viewport.view_to_garden(pt),
        );
        true
    }

    /// Pointer move in view coordinates. Returns `true` while dragging, in
    /// which case the host should redraw; moves with no active drag are
    /// ignored.
    pub fn pointer_move(&mut self, pt: Point) -> bool {
        let garden_pt = self.viewport().view_to_garden(pt);
        self.drag.update(garden_pt).is_some()
    }

    /// Pointer release in view coordinates: persists the drop, exactly once.
    ///
    /// If the dragged position was deleted mid-gesture, the store treats the
    /// stale write as a no-op; the gesture simply dissolves.
    pub fn pointer_up(&mut self, pt: Point) {
        let garden_pt = self.viewport().view_to_garden(pt);
        self.drag.update(garden_pt);
        if let Some(drop) = self.drag.finish() {
            self.store.update_position(
                &drop.key.plant_id,
                &drop.key.color_id,
                drop.index,
                drop.position.x,
                drop.position.y,
            );
        }
    }

    /// Double-click in view coordinates: deletes the hit instance.
    ///
    /// Independent of drag state; a concurrent drag on the same instance is
    /// the benign race the store's best-effort updates exist for.
    /// Returns `true` when an instance was removed.
    pub fn double_click(&mut self, pt: Point) -> bool {
        let scene = self.scene();
        let Some(mark) = scene.hit_test(pt) else {
            return false;
        };
        let (key, index) = (mark.key.clone(), mark.position_index);
        self.store
            .remove_position(&key.plant_id, &key.color_id, index);
        true
    }

    /// Toggles a selection from a catalog card.
    ///
    /// Adding a selection re-resolves the catalog so the new placement can
    /// render; removing one leaves the (monotone) cache alone. Returns
    /// `true` when the pair is selected after the call.
    pub fn toggle_selection(
        &mut self,
        plant_id: &str,
        color_id: &str,
        niche_id: Option<&str>,
    ) -> bool {
        let selected = self.store.toggle_placement(plant_id, color_id, niche_id);
        if selected {
            self.refresh_catalog();
        }
        selected
    }

    /// Adds one instance of a selected placement at the garden center.
    ///
    /// This is the only path that creates a position without a drag gesture.
    /// Returns the new position's index, or `None` when the pair is not
    /// selected.
    pub fn add_card_instance(&mut self, plant_id: &str, color_id: &str) -> Option<usize> {
        let state = self.store.state();
        let center = (state.width / 2.0, state.length / 2.0);
        let index = self.store.add_position(plant_id, color_id, center.0, center.1);
        if index.is_some() {
            self.refresh_catalog();
        }
        index
    }

    /// Re-resolves every current selection into the record cache.
    pub fn refresh_catalog(&mut self) -> RefreshSummary {
        let summary = self
            .catalog
            .refresh(self.store.state().plants.iter().map(|p| &p.key));
        log::debug!(
            "catalog refresh: {} resolved, {} rejected",
            summary.resolved,
            summary.rejected
        );
        summary
    }

    /// The filtered card list for the current selections.
    #[must_use]
    pub fn cards(&self, bounds: &FilterBounds) -> Vec<PlantCard> {
        visible_cards(self.store.state(), &self.catalog, bounds)
    }

    /// Sets the garden extents from the dimension inputs.
    pub fn set_dimensions(&mut self, width: f64, length: f64) {
        self.store.update_dimensions(width, length);
    }

    /// Sets the garden name from the name input.
    pub fn set_name(&mut self, name: &str) {
        self.store.update_name(name);
    }

    /// Sets the garden description.
    pub fn set_description(&mut self, description: &str) {
        self.store.update_description(description);
    }

    /// Resets to the default garden, abandoning any drag in flight.
    pub fn clear(&mut self) {
        self.drag.cancel();
        self.store.clear();
    }

    /// Pushes the garden to the save endpoint.
    ///
    /// On the first successful save the returned `garden_id` is written back
    /// and persisted. Failures carry the user-facing message split mandated
    /// by the error taxonomy; local state is never rolled back.
    pub fn save_with<E: SaveEndpoint>(
        &mut self,
        endpoint: &mut E,
    ) -> Result<SaveReceipt, SyncError> {
        push_garden(&mut self.store, endpoint)
    }

    /// Replaces the local garden with a remote one, then re-resolves it.
    pub fn load_remote<G: GardenGateway>(
        &mut self,
        gateway: &mut G,
        garden_id: &str,
    ) -> Result<(), SyncError> {
        let state = fetch_garden(gateway, garden_id)?;
        self.drag.cancel();
        self.store.replace(state);
        self.refresh_catalog();
        Ok(())
    }
}
