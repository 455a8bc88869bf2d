//! Configuration model for the manifestd control plane.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ManifestdError, Result};

/// Root configuration for the HTTP control plane.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
    /// First host port handed out to registered manifests.
    pub port_base: u16,
    /// Port the launched containers listen on internally.
    pub container_port: u16,
    /// Container runtime executable (`docker`, `podman`, or a full path).
    pub runtime_binary: String,
    /// Directory served under `/web/`.
    pub web_dir: PathBuf,
    /// Whether registrations pull and launch containers.
    ///
    /// When disabled, manifests are only recorded and no port is assigned.
    pub orchestration: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: constants::DEFAULT_LISTEN_ADDR.to_owned(),
            port_base: constants::DEFAULT_PORT_BASE,
            container_port: constants::DEFAULT_CONTAINER_PORT,
            runtime_binary: constants::DEFAULT_RUNTIME_BINARY.to_owned(),
            web_dir: PathBuf::from(constants::DEFAULT_WEB_DIR),
            orchestration: true,
        }
    }
}

impl ServerConfig {
    /// Reads a JSON config file, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`ServerConfig::validate`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestdError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the server cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestdError::Config`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.trim().is_empty() {
            return Err(ManifestdError::Config {
                message: "listen_addr must not be empty".into(),
            });
        }
        if self.port_base == 0 {
            return Err(ManifestdError::Config {
                message: "port_base must be greater than zero".into(),
            });
        }
        if self.container_port == 0 {
            return Err(ManifestdError::Config {
                message: "container_port must be greater than zero".into(),
            });
        }
        if self.orchestration && self.runtime_binary.trim().is_empty() {
            return Err(ManifestdError::Config {
                message: "runtime_binary must be set when orchestration is enabled".into(),
            });
        }
        Ok(())
    }
}
