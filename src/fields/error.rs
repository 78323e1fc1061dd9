//! Field Reconciliation Error Types

use crate::hub::error::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("{path} is not valid JSON: {message}")]
    Json { path: String, message: String },

    #[error("Custom field file {path} must carry a string-valued '{key}' key")]
    MissingKey { path: String, key: String },

    #[error("Field definitions file {path} must be a JSON array of definitions: {message}")]
    Definitions { path: String, message: String },

    #[error(
        "Cannot update custom field values on project {project}, version {version}: \
         the project-version was not found after {attempts} lookup attempts"
    )]
    TargetNotFound {
        project: String,
        version: String,
        attempts: usize,
    },

    #[error("Transport failure during reconciliation: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;
