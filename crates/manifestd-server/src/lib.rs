//! # manifestd-server
//!
//! HTTP surface of the manifestd control plane.
//!
//! - `POST /api/v1/manifests` registers a manifest.
//! - `GET /api/v1/status` returns every registered manifest.
//! - `/web/` serves static assets; any other path returns an index page.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod api;
pub mod error;
pub mod handlers;
pub mod server;

pub use api::{AppState, create_router};
pub use server::ManifestServer;
