//! # Vitrine Errors
//!
//! Shared error types for the Vitrine site builder.
//!
//! Uses `thiserror` for structured error definitions with named fields.
//! Nothing in this system retries automatically; every error either degrades
//! locally (read path falls back to the default document) or propagates to
//! the nearest boundary unchanged in kind.

use thiserror::Error;

/// Document store errors.
///
/// An absent key is not an error at this level (reads model it as `None` and
/// fall back to the default document); `Backend` covers the transport and
/// credential failures that must surface to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage backend {operation} failed: {reason}")]
    Backend { operation: String, reason: String },

    #[error("Failed to serialize document: {reason}")]
    Serialization { reason: String },
}

impl StorageError {
    /// Shorthand for a backend failure wrapping a transport-level error.
    pub fn backend(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Backend {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Asset upload errors.
///
/// A missing payload and missing configuration are distinct kinds so the
/// HTTP layer can answer 400 vs 500 without string matching.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file payload supplied")]
    EmptyPayload,

    #[error("Upload storage configuration missing: {message}")]
    Configuration { message: String },

    #[error("Upload to backend failed: {reason}")]
    Backend { reason: String },
}

/// Profile registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Profile name must contain at least one character")]
    InvalidName,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Document validation errors, checked before any backend call.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Entry in {collection} has an empty id")]
    EmptyEntryId { collection: String },

    #[error("Duplicate service id: {id}")]
    DuplicateServiceId { id: String },

    #[error("Duplicate gallery id: {id}")]
    DuplicateGalleryId { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StorageError::Configuration {
            message: "bucket name not set".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Storage configuration error: bucket name not set"
        );
    }

    #[test]
    fn backend_shorthand_carries_operation() {
        let err = StorageError::backend("put", "connection refused");
        assert_eq!(
            err.to_string(),
            "Storage backend put failed: connection refused"
        );
    }

    #[test]
    fn upload_error_kinds_are_distinct() {
        let config = UploadError::Configuration {
            message: "no credentials".to_string(),
        };
        assert!(!matches!(config, UploadError::Backend { .. }));
        assert_eq!(
            UploadError::EmptyPayload.to_string(),
            "No file payload supplied"
        );
    }

    #[test]
    fn document_error_display() {
        let err = DocumentError::DuplicateServiceId {
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate service id: abc");
    }
}
