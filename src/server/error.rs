//! Error types and JSON error responses for the mock server.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::fetch::Resource;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Could not find available port in range {start}-{end}")]
    NoAvailablePort { start: u16, end: u16 },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    /// Injected failure for a dashboard resource.
    #[error("Failed to fetch {resource}")]
    ResourceUnavailable { resource: Resource },

    #[error("No route for {path}")]
    NotFound { path: String },
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::ResourceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::InvalidBindAddr { .. }
            | ServerError::NoAvailablePort { .. }
            | ServerError::Bind { .. }
            | ServerError::NotBound
            | ServerError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::InvalidBindAddr { .. } => "invalid_bind_addr",
            ServerError::NoAvailablePort { .. } => "no_available_port",
            ServerError::Bind { .. } => "bind_error",
            ServerError::NotBound => "not_bound",
            ServerError::Serve(_) => "serve_error",
            ServerError::ResourceUnavailable { .. } => "resource_unavailable",
            ServerError::NotFound { .. } => "not_found",
        }
    }

    /// `{"error": {"type", "message", "request_id"}}`
    pub fn to_json(&self, request_id: &str) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "request_id": request_id
            }
        })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%request_id, error = %self, "request failed");
        (self.status_code(), Json(self.to_json(&request_id))).into_response()
    }
}
