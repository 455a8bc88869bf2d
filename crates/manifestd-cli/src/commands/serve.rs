//! `manifestd serve` — Run the HTTP control plane.

use std::path::PathBuf;

use clap::Args;
use manifestd_common::config::ServerConfig;
use manifestd_server::ManifestServer;

/// Arguments for the `serve` command.
///
/// Flags override the config file, which overrides built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// JSON config file.
    #[arg(long, env = "MANIFESTD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "MANIFESTD_LISTEN")]
    pub listen: Option<String>,

    /// First host port handed out to registered manifests.
    #[arg(long, env = "MANIFESTD_PORT_BASE")]
    pub port_base: Option<u16>,

    /// Port the launched containers listen on.
    #[arg(long, env = "MANIFESTD_CONTAINER_PORT")]
    pub container_port: Option<u16>,

    /// Container runtime executable (docker, podman, ...).
    #[arg(long, env = "MANIFESTD_RUNTIME")]
    pub runtime: Option<String>,

    /// Directory served under /web/.
    #[arg(long, env = "MANIFESTD_WEB_DIR")]
    pub web_dir: Option<PathBuf>,

    /// Only record manifests; never pull images or start containers.
    #[arg(long, env = "MANIFESTD_NO_ORCHESTRATION")]
    pub no_orchestration: bool,
}

impl ServeArgs {
    /// Merges the config file and flags into the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result
    /// is invalid.
    pub fn resolve_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(listen) = &self.listen {
            config.listen_addr.clone_from(listen);
        }
        if let Some(port_base) = self.port_base {
            config.port_base = port_base;
        }
        if let Some(container_port) = self.container_port {
            config.container_port = container_port;
        }
        if let Some(runtime) = &self.runtime {
            config.runtime_binary.clone_from(runtime);
        }
        if let Some(web_dir) = &self.web_dir {
            config.web_dir.clone_from(web_dir);
        }
        if self.no_orchestration {
            config.orchestration = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Executes the `serve` command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the address cannot
/// be bound, or the server fails.
pub fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    tracing::info!(?config, "starting manifestd");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(ManifestServer::new(config).run())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let config = ServeArgs::default().resolve_config().expect("resolve");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("manifestd.json");
        std::fs::write(&path, r#"{"port_base": 9000, "runtime_binary": "podman"}"#)
            .expect("write");

        let args = ServeArgs {
            config: Some(path),
            port_base: Some(10_000),
            no_orchestration: true,
            ..ServeArgs::default()
        };
        let config = args.resolve_config().expect("resolve");
        assert_eq!(config.port_base, 10_000);
        assert_eq!(config.runtime_binary, "podman");
        assert!(!config.orchestration);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = ServeArgs {
            container_port: Some(0),
            ..ServeArgs::default()
        };
        assert!(args.resolve_config().is_err());
    }
}
