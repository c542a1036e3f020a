// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state machine for moving placed instances.
//!
//! The controller is either idle or tracking exactly one grabbed instance.
//! A grab captures the instance's identity and the pointer-to-center offset
//! in garden space, so moves preserve the grab point instead of snapping the
//! plant center to the pointer. The live position is transient render state;
//! nothing is persisted until the drop, which [`DragController::finish`]
//! yields exactly once.

use floret_garden::PlacementKey;
use kurbo::{Point, Vec2};

/// The instance currently being dragged, with its transient live position.
#[derive(Clone, Debug, PartialEq)]
pub struct DragGrab {
    key: PlacementKey,
    index: usize,
    offset: Vec2,
    live: Point,
}

impl DragGrab {
    /// The grabbed placement.
    #[must_use]
    pub fn key(&self) -> &PlacementKey {
        &self.key
    }

    /// Index of the grabbed position within its placement.
    #[must_use]
    pub fn position_index(&self) -> usize {
        self.index
    }

    /// Current live position in garden coordinates.
    #[must_use]
    pub fn live(&self) -> Point {
        self.live
    }

    /// Returns `true` if this grab overrides the given instance.
    #[must_use]
    pub fn overrides(&self, key: &PlacementKey, index: usize) -> bool {
        self.key == *key && self.index == index
    }
}

/// A completed drag: where the instance should be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct DragDrop {
    /// The dragged placement.
    pub key: PlacementKey,
    /// Index of the dragged position.
    pub index: usize,
    /// Final position in garden coordinates.
    pub position: Point,
}

/// Idle ⇄ Dragging controller over pointer events in garden space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragController {
    grab: Option<DragGrab>,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self { grab: None }
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// The active grab, if any, for render-time position overrides.
    #[must_use]
    pub fn grab(&self) -> Option<&DragGrab> {
        self.grab.as_ref()
    }

    /// Starts dragging the instance whose center is at `center`.
    ///
    /// `pointer` is where the instance was grabbed; the offset between the
    /// two is preserved for the whole gesture. Starting a drag while one is
    /// active replaces the previous grab without persisting it.
    pub fn begin(&mut self, key: PlacementKey, index: usize, center: Point, pointer: Point) {
        self.grab = Some(DragGrab {
            key,
            index,
            offset: center - pointer,
            live: center,
        });
    }

    /// Advances the live position from a pointer move.
    ///
    /// Returns the new live position while dragging, `None` when idle (moves
    /// with no active grab are ignored).
    pub fn update(&mut self, pointer: Point) -> Option<Point> {
        let grab = self.grab.as_mut()?;
        grab.live = pointer + grab.offset;
        Some(grab.live)
    }

    /// Ends the drag, yielding the drop to persist.
    ///
    /// The grab is consumed: a second call without a new [`begin`](Self::begin)
    /// returns `None`, so a gesture persists at most once.
    pub fn finish(&mut self) -> Option<DragDrop> {
        self.grab.take().map(|grab| DragDrop {
            key: grab.key,
            index: grab.index,
            position: grab.live,
        })
    }

    /// Abandons the drag without yielding a drop.
    pub fn cancel(&mut self) {
        self.grab = None;
    }
}
