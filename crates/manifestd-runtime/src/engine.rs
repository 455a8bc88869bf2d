//! Registration engine that drives a manifest from validation to storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use manifestd_common::config::ServerConfig;
use manifestd_common::manifest::{Manifest, StoredManifest};

use crate::backend::{self, ContainerRuntime};
use crate::error::RegisterError;
use crate::registry::Registry;

/// Outcome of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The record now stored in the registry.
    pub record: StoredManifest,
    /// Human-readable summary for the caller.
    pub message: String,
}

/// Coordinates validation, the container runtime, and the registry.
///
/// Every method blocks while the runtime works. Async callers should run
/// [`Engine::register`] on a blocking thread.
#[derive(Clone)]
pub struct Engine {
    registry: Arc<Registry>,
    runtime: Option<Arc<dyn ContainerRuntime>>,
}

impl Engine {
    /// Creates an engine over `registry`.
    ///
    /// With `runtime` set to `None` manifests are only recorded.
    #[must_use]
    pub fn new(registry: Arc<Registry>, runtime: Option<Arc<dyn ContainerRuntime>>) -> Self {
        Self { registry, runtime }
    }

    /// Creates an engine with an empty registry and the runtime described
    /// by `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(Registry::new(config.port_base)),
            backend::from_config(config),
        )
    }

    /// Returns the registry backing this engine.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns whether registrations launch containers.
    #[must_use]
    pub const fn orchestrates(&self) -> bool {
        self.runtime.is_some()
    }

    /// Registers `manifest`.
    ///
    /// With orchestration the image is pulled, a host port is assigned,
    /// and any container of the same name is replaced by a fresh one.
    /// The registry is written only once every step has succeeded. A port
    /// reserved for a run that fails is handed back.
    ///
    /// # Errors
    ///
    /// Returns a [`RegisterError`] naming the step that failed.
    pub fn register(&self, manifest: Manifest) -> Result<Registration, RegisterError> {
        manifest.validate()?;

        let Some(runtime) = &self.runtime else {
            let message = format!(
                "manifest {} registered with image {}",
                manifest.name(),
                manifest.image()
            );
            return Ok(self.store(StoredManifest::new(manifest, None), message));
        };

        let pulled = runtime
            .pull(manifest.image())
            .map_err(|e| RegisterError::Pull {
                image: manifest.image().to_owned(),
                source: e,
            })?;
        tracing::debug!(command = %pulled.command, "image pulled");

        let port = self
            .registry
            .reserve_port(manifest.name())
            .map_err(RegisterError::Ports)?;

        let started = match runtime.replace_and_run(manifest.name(), manifest.image(), port) {
            Ok(started) => started,
            Err(e) => {
                self.registry.release_port(port);
                return Err(RegisterError::Run {
                    name: manifest.name().to_owned(),
                    source: e,
                });
            }
        };
        tracing::debug!(
            command = %started.command,
            output = %started.output.trim_end(),
            "container started"
        );

        let message = format!(
            "image {} registered and container started with name {}",
            manifest.image(),
            manifest.name()
        );
        Ok(self.store(StoredManifest::new(manifest, Some(port)), message))
    }

    /// Returns a copy of every registered manifest, keyed by name.
    #[must_use]
    pub fn status(&self) -> BTreeMap<String, StoredManifest> {
        self.registry.snapshot()
    }

    fn store(&self, record: StoredManifest, message: String) -> Registration {
        let _ = self.registry.put(record.clone());
        tracing::info!(
            name = %record.name(),
            image = %record.manifest.image(),
            port = ?record.port,
            "manifest registered"
        );
        Registration { record, message }
    }
}
