//! Error types and response mapping for the supervisor facade.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::client::Ack;

/// Rejections and failures of supervisor operations.
///
/// Every variant is rendered as `{"ok": false, "msg": ...}` with the status
/// code from [`SupervisorError::status_code`].
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The singleton slot is taken.
    #[error("A process is already running")]
    Busy,

    #[error("No active process")]
    NoProcess,

    #[error("Scraper is not running")]
    NotRunning,

    /// Running, but its stdin is gone.
    #[error("Process is not responding")]
    NotResponding,

    #[error("No process to stop")]
    NothingToStop,

    #[error("No browser executable found")]
    BrowserNotFound,

    #[error("Failed to launch '{label}': {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SupervisorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SupervisorError::Busy => StatusCode::CONFLICT,
            SupervisorError::NoProcess => StatusCode::BAD_REQUEST,
            SupervisorError::NotRunning => StatusCode::BAD_REQUEST,
            SupervisorError::NotResponding => StatusCode::BAD_REQUEST,
            SupervisorError::NothingToStop => StatusCode::BAD_REQUEST,
            SupervisorError::BrowserNotFound => StatusCode::NOT_FOUND,
            SupervisorError::Spawn { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SupervisorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SupervisorError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(Ack::failure(self.to_string()))).into_response()
    }
}

/// Failures starting or running the HTTP server itself.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Invalid bind address '{addr}'")]
    InvalidBindAddress { addr: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
