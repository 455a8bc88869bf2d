//! Blocking HTTP client for a running control plane.

use std::collections::BTreeMap;

use anyhow::Context;
use manifestd_common::constants::{MANIFESTS_PATH, STATUS_PATH};
use manifestd_common::manifest::{Manifest, StoredManifest};
use manifestd_server::handlers::RegisterResponse;
use reqwest::blocking::{Client, Response};

/// Talks to the control plane at a base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Creates a client for the server at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Registers `manifest` with the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the manifest.
    pub fn register(&self, manifest: &Manifest) -> anyhow::Result<RegisterResponse> {
        let url = self.url(MANIFESTS_PATH);
        tracing::debug!(%url, name = %manifest.name(), "registering manifest");
        let response = self
            .http
            .post(&url)
            .json(manifest)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        Ok(check(response)?.json()?)
    }

    /// Fetches every registered manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or answers with an error.
    pub fn status(&self) -> anyhow::Result<BTreeMap<String, StoredManifest>> {
        let url = self.url(STATUS_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("failed to reach {url}"))?;
        Ok(check(response)?.json()?)
    }
}

/// Turns an error response into an error carrying the server's message.
fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(anyhow::anyhow!("server returned {status}: {}", error_message(&body)))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}
