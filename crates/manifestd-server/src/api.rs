//! Router construction.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use manifestd_common::constants::{MANIFESTS_PATH, STATUS_PATH, WEB_PREFIX};
use manifestd_runtime::engine::Engine;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    engine: Engine,
}

impl AppState {
    /// Wraps the registration engine.
    #[must_use]
    pub const fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Returns the registration engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }
}

/// Creates the control plane router.
///
/// Static files are served from `web_dir` under `/web/`.
pub fn create_router(state: AppState, web_dir: &Path) -> Router {
    Router::new()
        .route(
            MANIFESTS_PATH,
            post(handlers::register_manifest).fallback(handlers::method_not_allowed),
        )
        .route(
            STATUS_PATH,
            get(handlers::status).fallback(handlers::method_not_allowed),
        )
        .nest_service(WEB_PREFIX, ServeDir::new(web_dir))
        .fallback(handlers::index)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
