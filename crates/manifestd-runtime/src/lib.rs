//! Manifest registration for the manifestd control plane.
//!
//! - [`registry`]: the lock-guarded in-memory manifest store.
//! - [`ports`]: counter-based host port allocation.
//! - [`backend`]: the container runtime abstraction and its CLI backend.
//! - [`engine`]: the validate, pull, run, store pipeline.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod backend;
pub mod engine;
pub mod error;
pub mod exec;
pub mod ports;
pub mod registry;
