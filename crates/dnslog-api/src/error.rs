//! Error types for the DNS log API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dnslog_core::{DnsLogError, ErrorBody};
use std::net::SocketAddr;
use thiserror::Error;

/// Errors that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Dataset could not be fetched or parsed.
    #[error("failed to load dataset: {0}")]
    Load(#[from] DnsLogError),

    /// Listener failed to bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Server loop failed.
    #[error("server error: {0}")]
    Serve(std::io::Error),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-level failures, rendered as `{"detail": ...}` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request parameters or body failed validation.
    #[error("{0}")]
    Validation(String),

    /// No route for the request path.
    #[error("Not Found")]
    NotFound,

    /// Response could not be produced.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DnsLogError> for ApiError {
    fn from(err: DnsLogError) -> Self {
        match err {
            DnsLogError::InvalidThreshold(_) => Self::Validation(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
