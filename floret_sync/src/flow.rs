// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Endpoint transport traits and the push/fetch/list flows.

use core::fmt;

use floret_garden::{GardenState, GardenStore, Storage};
use serde::Deserialize;

use crate::wire::{GardenSummary, decode_garden, decode_garden_list, encode_save_request};

/// A transport-level failure: the request never produced an HTTP reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportError {
    reason: String,
}

impl TransportError {
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

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed: {}", self.reason)
    }
}

impl std::error::Error for TransportError {}

/// An HTTP reply: status code plus raw body.
///
/// Flows in this crate interpret the status; transports just deliver it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointReply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl EndpointReply {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Transport for the save endpoint.
pub trait SaveEndpoint {
    /// Submits the already-encoded garden body, returning the raw reply.
    fn submit(&mut self, body: &str) -> Result<EndpointReply, TransportError>;
}

/// Transport for the load and list endpoints.
pub trait GardenGateway {
    /// Fetches the garden with the given server identity.
    fn load(&mut self, garden_id: &str) -> Result<EndpointReply, TransportError>;

    /// Fetches the user's garden list.
    fn list(&mut self) -> Result<EndpointReply, TransportError>;
}

/// Failure taxonomy of the sync flows.
///
/// Only two categories reach the user: the actionable auth failure and a
/// generic "try again" for everything else. Local state is never rolled back
/// on any of them.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncError {
    /// The server answered 401/403: the user is not logged in.
    AuthRequired,
    /// The server answered, but refused: any other non-2xx status, or a
    /// well-formed reply with `success: false`.
    Rejected {
        /// HTTP status of the reply.
        status: u16,
        /// Server-provided error detail, when the body carried one.
        detail: Option<String>,
    },
    /// The request never produced a reply.
    Transport(TransportError),
    /// A 2xx reply whose body did not decode.
    MalformedReply(String),
}

impl SyncError {
    /// The message shown to the user.
    ///
    /// Auth failures get the distinct, actionable wording; every other
    /// failure degrades to the same retry suggestion since the local copy
    /// remains intact either way.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AuthRequired => "You must be logged in to save your garden.",
            _ => "Something went wrong; your garden is still stored on this device. Please try again.",
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthRequired => write!(f, "not logged in"),
            Self::Rejected { status, detail } => match detail {
                Some(detail) => write!(f, "server refused (HTTP {status}): {detail}"),
                None => write!(f, "server refused (HTTP {status})"),
            },
            Self::Transport(err) => err.fmt(f),
            Self::MalformedReply(reason) => write!(f, "malformed server reply: {reason}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of a successful save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Server identity of the saved garden, when the reply carried one.
    pub garden_id: Option<String>,
}

#[derive(Deserialize)]
struct WireSaveReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    garden_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Serializes the store's garden and submits it to the save endpoint.
///
/// On success, a `garden_id` returned for a garden that does not have one
/// yet is written back into the store and persisted. On any failure the
/// local state is left untouched; the caller surfaces
/// [`SyncError::user_message`].
pub fn push_garden<S: Storage, E: SaveEndpoint>(
    store: &mut GardenStore<S>,
    endpoint: &mut E,
) -> Result<SaveReceipt, SyncError> {
    let body = encode_save_request(store.state());
    let reply = endpoint.submit(&body).map_err(SyncError::Transport)?;
    let reply = check_reply(reply)?;

    let decoded: WireSaveReply = serde_json::from_str(&reply.body)
        .map_err(|err| SyncError::MalformedReply(err.to_string()))?;
    if !decoded.success {
        return Err(SyncError::Rejected {
            status: reply.status,
            detail: decoded.error,
        });
    }

    if store.state().garden_id.is_none()
        && let Some(id) = decoded.garden_id.as_deref()
    {
        store.set_garden_id(id);
        log::debug!("garden assigned server identity {id}");
    }
    Ok(SaveReceipt {
        garden_id: decoded.garden_id,
    })
}

/// Fetches a remote garden and decodes it into a state value.
///
/// The caller decides what to do with it; typically
/// `store.replace(state)` to adopt it as the local copy.
pub fn fetch_garden<G: GardenGateway>(
    gateway: &mut G,
    garden_id: &str,
) -> Result<GardenState, SyncError> {
    let reply = gateway.load(garden_id).map_err(SyncError::Transport)?;
    let reply = check_reply(reply)?;
    decode_garden(&reply.body, Some(garden_id))
        .map_err(|err| SyncError::MalformedReply(err.reason().to_owned()))
}

/// Fetches the user's garden list.
pub fn list_gardens<G: GardenGateway>(gateway: &mut G) -> Result<Vec<GardenSummary>, SyncError> {
    let reply = gateway.list().map_err(SyncError::Transport)?;
    let reply = check_reply(reply)?;
    decode_garden_list(&reply.body)
        .map_err(|err| SyncError::MalformedReply(err.reason().to_owned()))
}

/// Maps non-2xx replies into the error taxonomy.
fn check_reply(reply: EndpointReply) -> Result<EndpointReply, SyncError> {
    if reply.is_auth_failure() {
        return Err(SyncError::AuthRequired);
    }
    if !reply.is_success() {
        // Pull the server's error field out when the body happens to be the
        // standard failure shape; anything else is just dropped.
        let detail = serde_json::from_str::<WireSaveReply>(&reply.body)
            .ok()
            .and_then(|decoded| decoded.error);
        return Err(SyncError::Rejected {
            status: reply.status,
            detail,
        });
    }
    Ok(reply)
}
