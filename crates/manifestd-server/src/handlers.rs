//! Request handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use manifestd_common::manifest::{Manifest, StoredManifest};
use manifestd_runtime::error::RegisterError;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::error::ApiError;

/// Body of a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Human-readable summary.
    pub message: String,
    /// Host port published for the container, when one was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

const INDEX_HTML: &str = "<h2>Manifest server</h2>
<p>Use <code>POST /api/v1/manifests</code> to register an image</p>
<p>Use <code>GET /api/v1/status</code> to list registered manifests</p>
";

/// `POST /api/v1/manifests`
///
/// The body is decoded by hand so that any malformed input, whatever its
/// content type, is reported as invalid JSON.
///
/// # Errors
///
/// Returns an [`ApiError`] for malformed bodies, invalid manifests, and
/// runtime failures.
pub async fn register_manifest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisterResponse>, ApiError> {
    let manifest = Manifest::from_json_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejecting undecodable manifest");
        ApiError::InvalidInput
    })?;

    let engine = state.engine().clone();
    let outcome = tokio::task::spawn_blocking(move || engine.register(manifest))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let registration = outcome.map_err(|e| {
        match &e {
            RegisterError::Validation(v) => tracing::warn!(error = %v, "validation failed"),
            other => tracing::error!(error = %other, "registration failed"),
        }
        ApiError::from(e)
    })?;

    Ok(Json(RegisterResponse {
        status: "ok".into(),
        message: registration.message,
        port: registration.record.port,
    }))
}

/// `GET /api/v1/status`
pub async fn status(State(state): State<AppState>) -> Json<BTreeMap<String, StoredManifest>> {
    Json(state.engine().status())
}

/// Any method an endpoint does not accept.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Informational page for every unmatched path.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
