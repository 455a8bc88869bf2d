//! Control plane server.

use std::future::Future;

use manifestd_common::config::ServerConfig;
use manifestd_runtime::engine::Engine;
use tokio::net::TcpListener;

use crate::api::{AppState, create_router};
use crate::error::ServerError;

/// The HTTP control plane.
pub struct ManifestServer {
    config: ServerConfig,
    engine: Engine,
}

impl ManifestServer {
    /// Creates a server with an empty registry and the runtime described
    /// by `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let engine = Engine::from_config(&config);
        Self { config, engine }
    }

    /// Binds the configured address and serves until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: self.config.listen_addr.clone(),
                source: e,
            })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on `listener` until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server stops with an I/O error.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(AppState::new(self.engine.clone()), &self.config.web_dir);

        match listener.local_addr() {
            Ok(addr) => tracing::info!(%addr, orchestration = self.engine.orchestrates(), "manifestd listening"),
            Err(e) => tracing::warn!(error = %e, "listening on unknown address"),
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                let _ = signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, starting graceful shutdown");
}
