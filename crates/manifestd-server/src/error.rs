//! HTTP-facing error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use manifestd_common::error::ValidationError;
use manifestd_runtime::error::RegisterError;
use thiserror::Error;

/// Error returned by a request handler.
///
/// Runtime details are logged, never sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a JSON manifest.
    #[error("invalid JSON")]
    InvalidInput,

    /// The manifest is missing a required field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The endpoint does not accept this HTTP method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// The runtime could not pull the image.
    #[error("failed to pull image")]
    PullFailed,

    /// The runtime could not start the container.
    #[error("failed to start container")]
    RunFailed,

    /// The request could not be completed for an unexpected reason.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PullFailed | Self::RunFailed | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(e) => Self::Validation(e),
            RegisterError::Pull { .. } => Self::PullFailed,
            RegisterError::Ports(_) | RegisterError::Run { .. } => Self::RunFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

/// Error raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
