//! Errors raised while driving the container runtime and registering manifests.

use manifestd_common::error::ValidationError;
use thiserror::Error;

/// Failure of an external runtime invocation or of port allocation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime executable could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Executable that failed to start.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The runtime ran but reported failure.
    #[error("`{command}` failed ({status})")]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Combined stdout and stderr.
        output: String,
    },

    /// Every port above the base has been handed out.
    #[error("no host ports left above base {base}")]
    PortsExhausted {
        /// Configured base port.
        base: u16,
    },
}

/// Convenience alias for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Why a registration was rejected.
///
/// The registry is never modified when one of these is returned.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The manifest failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Pulling the image failed.
    #[error("failed to pull image {image}: {source}")]
    Pull {
        /// Image that could not be pulled.
        image: String,
        /// Underlying runtime failure.
        source: RuntimeError,
    },

    /// No host port could be assigned.
    #[error("failed to allocate a host port: {0}")]
    Ports(#[source] RuntimeError),

    /// Replacing or starting the container failed.
    #[error("failed to start container {name}: {source}")]
    Run {
        /// Container name.
        name: String,
        /// Underlying runtime failure.
        source: RuntimeError,
    },
}
