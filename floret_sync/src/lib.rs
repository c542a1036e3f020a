// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret Sync: pushing the garden to, and pulling it from, the server.
//!
//! The durable source of truth is always the client-local copy owned by
//! `floret_garden`; this crate serializes it for the save endpoint, decodes
//! server replies, and maps failures into the two user-facing categories the
//! planner distinguishes:
//!
//! - [`SyncError::AuthRequired`]: the server answered 401/403. The user gets
//!   the distinct, actionable "must be logged in" message.
//! - everything else: a generic retry-suggesting failure. Local state is
//!   never rolled back on any failure.
//!
//! On the first successful save of a garden that has no server identity yet,
//! the returned `garden_id` is written back into the store and persisted, so
//! later sessions know which remote garden they correspond to.
//!
//! Transports are abstract: [`SaveEndpoint`] and [`GardenGateway`] are
//! implemented over HTTP in `floret_http` and by canned doubles in tests.
//!
//! ## Minimal example
//!
//! ```rust
//! use floret_garden::{GardenStore, MemoryStorage};
//! use floret_sync::{EndpointReply, SaveEndpoint, TransportError, push_garden};
//!
//! struct Accepting;
//!
//! impl SaveEndpoint for Accepting {
//!     fn submit(&mut self, _body: &str) -> Result<EndpointReply, TransportError> {
//!         Ok(EndpointReply {
//!             status: 201,
//!             body: r#"{"success": true, "garden_id": "g-42"}"#.to_owned(),
//!         })
//!     }
//! }
//!
//! let mut store = GardenStore::open(MemoryStorage::new());
//! store.toggle_placement("p1", "c1", None);
//!
//! let receipt = push_garden(&mut store, &mut Accepting).unwrap();
//! assert_eq!(receipt.garden_id.as_deref(), Some("g-42"));
//! assert_eq!(store.state().garden_id.as_deref(), Some("g-42"));
//! ```

mod flow;
mod wire;

pub use flow::{
    EndpointReply, GardenGateway, SaveEndpoint, SaveReceipt, SyncError, TransportError,
    fetch_garden, list_gardens, push_garden,
};
pub use wire::{
    DecodeError, GardenSummary, decode_garden, decode_garden_list, encode_save_request,
};
