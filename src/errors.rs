use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures of the static host. Nothing here is user-correctable; every
/// variant means the deployment is broken.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("SPA entry point missing at {}", path.display())]
    MissingIndex { path: PathBuf },

    #[error("Invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostError {
    pub fn is_missing_index(&self) -> bool {
        matches!(self, HostError::MissingIndex { .. })
    }
}

impl IntoResponse for HostError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");
        let status = if self.is_missing_index() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.to_string()).into_response()
    }
}
