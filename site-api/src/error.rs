//! Error types for the Vitrine API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use errors::{DocumentError, RegistryError, StorageError, UploadError};

/// Result type alias for the API.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while serving the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Document store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Profile registry failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Document invariant violation in a request body.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Asset upload failure.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// `POST /profiles` without a usable name.
    #[error("Name required")]
    MissingName,

    /// Unusable `profile` query parameter.
    #[error("Invalid profile id")]
    InvalidProfileId,

    /// Malformed multipart payload.
    #[error("Malformed upload request: {0}")]
    Multipart(String),

    /// Server startup error.
    #[error("Server error: {0}")]
    Server(String),
}

/// Error response body for HTTP endpoints.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Storage(err) | Self::Registry(RegistryError::Storage(err)) => match err {
                StorageError::Configuration { message } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    message.clone(),
                    None,
                ),
                other => {
                    tracing::error!(error = %other, "Storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "A storage error occurred".to_string(),
                        Some(other.to_string()),
                    )
                }
            },
            Self::Registry(RegistryError::InvalidName) | Self::MissingName => (
                StatusCode::BAD_REQUEST,
                "NAME_REQUIRED",
                "Name required".to_string(),
                None,
            ),
            Self::Document(err) => (
                StatusCode::BAD_REQUEST,
                "INVALID_DOCUMENT",
                err.to_string(),
                None,
            ),
            Self::Upload(UploadError::EmptyPayload) => (
                StatusCode::BAD_REQUEST,
                "NO_FILE",
                "No file uploaded".to_string(),
                None,
            ),
            Self::Upload(UploadError::Configuration { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPLOAD_NOT_CONFIGURED",
                "Server storage configuration missing".to_string(),
                None,
            ),
            Self::Upload(UploadError::Backend { reason }) => {
                tracing::error!(reason = %reason, "Upload failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPLOAD_FAILED",
                    "Upload failed".to_string(),
                    Some(reason.clone()),
                )
            }
            Self::InvalidProfileId => (
                StatusCode::BAD_REQUEST,
                "INVALID_PROFILE_ID",
                "Invalid profile id".to_string(),
                None,
            ),
            Self::Multipart(reason) => (
                StatusCode::BAD_REQUEST,
                "BAD_MULTIPART",
                reason.clone(),
                None,
            ),
            Self::Server(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVER_ERROR",
                message.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            success: false,
            message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_display() {
        assert_eq!(ApiError::MissingName.to_string(), "Name required");
    }

    #[test]
    fn storage_errors_pass_through_transparently() {
        let err = ApiError::from(StorageError::Configuration {
            message: "bucket name not set".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Storage configuration error: bucket name not set"
        );
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            success: false,
            message: "Upload failed".to_string(),
            code: "UPLOAD_FAILED".to_string(),
            details: Some("connection reset".to_string()),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("UPLOAD_FAILED"));
        assert!(json.contains("connection reset"));
    }

    #[test]
    fn error_response_without_details() {
        let resp = ErrorResponse {
            success: false,
            message: "No file uploaded".to_string(),
            code: "NO_FILE".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("details"));
    }
}
