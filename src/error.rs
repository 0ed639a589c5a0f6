//! Error taxonomy shared by the store, the option catalog and the HTTP boundary.
//!
//! Parse failures (land size, malformed chat bodies) never show up here: they
//! fall back to defaults where they happen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Crop data unavailable at {path}: {reason}")]
    DataUnavailable { path: String, reason: String },

    #[error("Invalid option type: {0}")]
    UnrecognizedOption(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;

impl CropError {
    pub fn status(&self) -> StatusCode {
        match self {
            CropError::UnrecognizedOption(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CropError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CropError::UnrecognizedOption(_) => self.to_string(),
            other => format!("An error occurred: {other}"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "status": "error", "message": message }))).into_response()
    }
}
