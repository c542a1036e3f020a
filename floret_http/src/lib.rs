// Copyright 2026 the Floret Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floret HTTP: the real transport behind the planner's endpoint traits.
//!
//! [`PlannerApi`] is a thin blocking HTTP client for the planner's JSON
//! endpoints, relative to a base URL (the planner mount, for example
//! `https://example.org/planner`):
//!
//! - `garden/plants/`: batched catalog resolve (POST)
//! - `garden/save/`: save the full garden (POST)
//! - `garden/load/{id}/`: load one garden (GET)
//! - `garden/list/`: list the user's gardens (GET)
//!
//! It implements [`CatalogSource`] for `floret_catalog` and both
//! [`SaveEndpoint`] and [`GardenGateway`] for `floret_sync`. Status
//! interpretation stays with those crates; this one only moves bytes and
//! reports transport failures.

use std::time::Duration;

use floret_catalog::{CatalogSource, SourceError};
use floret_sync::{EndpointReply, GardenGateway, SaveEndpoint, TransportError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Blocking client for the planner's JSON endpoints.
#[derive(Clone, Debug)]
pub struct PlannerApi {
    base: String,
    client: Client,
}

impl PlannerApi {
    /// Creates a client for the given base URL with default settings.
    ///
    /// Fails only when the TLS backend cannot be initialized.
    pub fn new(base: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| TransportError::new(err.to_string()))?;
        Ok(Self::with_client(base, client))
    }

    /// Creates a client reusing an existing `reqwest` client (for connection
    /// pooling or custom settings such as cookies).
    pub fn with_client(base: impl Into<String>, client: Client) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base, client }
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    fn post(&self, path: &str, body: &str) -> Result<EndpointReply, TransportError> {
        let url = self.url(path);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .map_err(|err| TransportError::new(err.to_string()))?;
        read_reply(response)
    }

    fn get(&self, path: &str) -> Result<EndpointReply, TransportError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| TransportError::new(err.to_string()))?;
        read_reply(response)
    }
}

fn read_reply(response: reqwest::blocking::Response) -> Result<EndpointReply, TransportError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|err| TransportError::new(err.to_string()))?;
    Ok(EndpointReply { status, body })
}

impl CatalogSource for PlannerApi {
    fn resolve(&mut self, request: &str) -> Result<String, SourceError> {
        let reply = self
            .post("garden/plants/", request)
            .map_err(|err| SourceError::new(err.reason().to_owned()))?;
        if !(200..300).contains(&reply.status) {
            return Err(SourceError::new(format!("HTTP {}", reply.status)));
        }
        Ok(reply.body)
    }
}

impl SaveEndpoint for PlannerApi {
    fn submit(&mut self, body: &str) -> Result<EndpointReply, TransportError> {
        self.post("garden/save/", body)
    }
}

impl GardenGateway for PlannerApi {
    fn load(&mut self, garden_id: &str) -> Result<EndpointReply, TransportError> {
        self.get(&format!("garden/load/{garden_id}/"))
    }

    fn list(&mut self) -> Result<EndpointReply, TransportError> {
        self.get("garden/list/")
    }
}
