//! API error types and their HTTP mappings.
//!
//! Client input problems map to 400 with a descriptive message. Anything
//! unexpected maps to 500 with a fixed opaque message; the real error chain
//! goes to the log, never to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned for any unexpected processing failure.
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred while analysing the dataset.";

/// Errors surfaced by the upload endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Multipart body had no `file` field.
    #[error("No file provided")]
    MissingFile,

    /// The `file` field carried an empty filename.
    #[error("No file selected")]
    EmptyFilename,

    /// Filename extension outside the accepted set.
    #[error("File type not allowed. Please upload CSV or Excel files.")]
    UnsupportedExtension,

    /// The staged file could not be parsed as tabular data.
    #[error("Error reading file: {0}")]
    UnreadableFile(String),

    /// Anything unexpected; detail is logged, not exposed.
    #[error("An internal error occurred while analysing the dataset.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::EmptyFilename
            | Self::UnsupportedExtension
            | Self::UnreadableFile(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref source) = self {
            error!("Internal error during upload processing: {:#}", source);
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
