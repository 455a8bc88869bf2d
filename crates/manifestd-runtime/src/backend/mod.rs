//! Container runtime abstraction.
//!
//! The control plane treats the runtime as a black-box collaborator with
//! two blocking primitives: pull an image, and replace-then-start a named
//! container.

pub mod cli;

use std::sync::Arc;

use manifestd_common::config::ServerConfig;

use crate::error::Result;
use crate::exec::CommandOutput;

pub use cli::CliRuntime;

/// Blocking interface to an external container runtime.
///
/// Implementors must be callable from several worker threads at once.
pub trait ContainerRuntime: Send + Sync {
    /// Pulls `image`, blocking until the runtime finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be reached or the pull fails.
    fn pull(&self, image: &str) -> Result<CommandOutput>;

    /// Removes any container called `name`, then starts a detached one
    /// running `image` with `host_port` published to the container port.
    ///
    /// Failure to remove a previous container is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the new container cannot be started.
    fn replace_and_run(&self, name: &str, image: &str, host_port: u16) -> Result<CommandOutput>;

    /// Returns whether the runtime looks usable on this host.
    fn is_available(&self) -> bool;
}

/// Builds the runtime described by `config`.
///
/// Returns `None` when orchestration is disabled, in which case
/// registrations are recorded without launching anything.
#[must_use]
pub fn from_config(config: &ServerConfig) -> Option<Arc<dyn ContainerRuntime>> {
    if !config.orchestration {
        tracing::info!("orchestration disabled, manifests will only be recorded");
        return None;
    }
    let runtime = CliRuntime::new(config.runtime_binary.clone(), config.container_port);
    if !runtime.is_available() {
        tracing::warn!(binary = %runtime.binary(), "container runtime not found on PATH");
    }
    Some(Arc::new(runtime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_orchestration_has_no_runtime() {
        let config = ServerConfig {
            orchestration: false,
            ..ServerConfig::default()
        };
        assert!(from_config(&config).is_none());
    }

    #[test]
    fn enabled_orchestration_builds_cli_runtime() {
        assert!(from_config(&ServerConfig::default()).is_some());
    }
}
