// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Durable storage backend trait and the persisting, observable store.

use core::fmt;

use hashbrown::HashMap;

use crate::state::GardenState;

/// Fixed key under which the serialized garden blob is stored.
pub const STORAGE_KEY: &str = "floret.garden";

/// Error reported by a [`Storage`] write.
///
/// Reads are infallible by contract: a backend that cannot produce a value
/// returns `None`, which the store treats like absence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageError {
    reason: String,
}

impl StorageError {
    /// Creates an error with a human-readable reason (for example, a quota
    /// message from the underlying platform).
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

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage write failed: {}", self.reason)
    }
}

impl std::error::Error for StorageError {}

/// A durable string-blob store with last-full-write-wins semantics.
///
/// This is the seam between the garden model and whatever durable storage the
/// host provides (browser local storage, a file, a test double). Backends
/// hold one value per key and need no transactional guarantees beyond "the
/// last complete write wins".
pub trait Storage {
    /// Returns the blob stored under `key`, if any.
    fn read(&mut self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`, if any.
    fn remove(&mut self, key: &str);
}

/// In-memory [`Storage`] backend.
///
/// Used in tests and as the fallback when no durable storage is available;
/// contents live only as long as the value itself.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&mut self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Observer callback invoked after every persisting mutation.
type Observer = dyn FnMut(&GardenState);

/// A [`GardenState`] bound to durable storage and change observers.
///
/// The store is the single writer of the garden: all mutations flow through
/// its methods, each of which applies the change, persists the full state
/// synchronously, and then notifies observers. Mutations that turn out to be
/// no-ops (toggling nothing, updating a stale index) neither persist nor
/// notify.
///
/// Persistence is deliberately infallible from the caller's point of view: a
/// failing write is logged and swallowed, and the in-memory state remains the
/// source of truth.
pub struct GardenStore<S> {
    state: GardenState,
    storage: S,
    observers: Vec<Box<Observer>>,
}

impl<S: fmt::Debug> fmt::Debug for GardenStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GardenStore")
            .field("state", &self.state)
            .field("storage", &self.storage)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: Storage> GardenStore<S> {
    /// Opens the store, loading durable state when present and well-formed.
    ///
    /// A missing blob and a blob that fails to parse are treated identically:
    /// the store starts from the default garden. Parse failures are logged at
    /// debug level and never propagated.
    pub fn open(mut storage: S) -> Self {
        let state = match storage.read(STORAGE_KEY) {
            Some(blob) => match serde_json::from_str::<GardenState>(&blob) {
                Ok(state) => state,
                Err(err) => {
                    log::debug!("discarding malformed garden blob: {err}");
                    GardenState::default()
                }
            },
            None => GardenState::default(),
        };
        Self {
            state,
            storage,
            observers: Vec::new(),
        }
    }

    /// Returns the current garden state.
    #[must_use]
    pub fn state(&self) -> &GardenState {
        &self.state
    }

    /// Consumes the store, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Registers an observer invoked after every persisting mutation.
    ///
    /// Observers receive the state after the change has been applied and
    /// persisted. Registration order is notification order.
    pub fn observe(&mut self, observer: impl FnMut(&GardenState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Serializes the current state, writes it, and notifies observers.
    ///
    /// Write failures are logged and swallowed; observers are notified
    /// regardless, since the in-memory state did change.
    pub fn save(&mut self) {
        match serde_json::to_string(&self.state) {
            Ok(blob) => {
                if let Err(err) = self.storage.write(STORAGE_KEY, &blob) {
                    log::warn!("garden state not persisted: {err}");
                }
            }
            Err(err) => log::warn!("garden state not serializable: {err}"),
        }
        let state = &self.state;
        for observer in &mut self.observers {
            observer(state);
        }
    }

    /// Toggles the placement for this identifier pair and persists.
    ///
    /// Returns `true` if the pair is selected after the call.
    pub fn toggle_placement(
        &mut self,
        plant_id: &str,
        color_id: &str,
        niche_id: Option<&str>,
    ) -> bool {
        let selected = self.state.toggle_placement(plant_id, color_id, niche_id);
        self.save();
        selected
    }

    /// Appends a position to the matching placement and persists.
    ///
    /// Returns the new position's index, or `None` (with no persistence)
    /// when the pair is not selected.
    pub fn add_position(
        &mut self,
        plant_id: &str,
        color_id: &str,
        x: f64,
        y: f64,
    ) -> Option<usize> {
        let index = self.state.add_position(plant_id, color_id, x, y);
        if index.is_some() {
            self.save();
        }
        index
    }

    /// Best-effort position overwrite; persists only when a position changed.
    pub fn update_position(&mut self, plant_id: &str, color_id: &str, index: usize, x: f64, y: f64) {
        if self.state.update_position(plant_id, color_id, index, x, y) {
            self.save();
        }
    }

    /// Removes a position by index; persists only when one was removed.
    pub fn remove_position(&mut self, plant_id: &str, color_id: &str, index: usize) {
        if self.state.remove_position(plant_id, color_id, index) {
            self.save();
        }
    }

    /// Sets the garden extents; persists only on change.
    pub fn update_dimensions(&mut self, width: f64, length: f64) {
        if self.state.set_dimensions(width, length) {
            self.save();
        }
    }

    /// Sets the display name; persists only on change.
    pub fn update_name(&mut self, name: &str) {
        if self.state.set_name(name) {
            self.save();
        }
    }

    /// Sets the description; persists only on change.
    pub fn update_description(&mut self, description: &str) {
        if self.state.set_description(description) {
            self.save();
        }
    }

    /// Records the server identity returned by a successful save.
    pub fn set_garden_id(&mut self, garden_id: &str) {
        if self.state.set_garden_id(garden_id) {
            self.save();
        }
    }

    /// Replaces the whole garden (for example, after loading a remote copy)
    /// and persists.
    pub fn replace(&mut self, state: GardenState) {
        self.state = state;
        self.save();
    }

    /// Resets to the default garden and persists.
    pub fn clear(&mut self) {
        self.state.reset();
        self.save();
    }
}
