//! Artifact Error Types

#[derive(Debug, Clone, thiserror::Error)]
pub enum ArtifactError {
    #[error("Unsupported scan file suffix '{suffix}' ({path})")]
    UnsupportedKind { path: String, suffix: String },

    #[error("Failed to read scan file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Scan file {path} is not valid JSON: {message}")]
    Json { path: String, message: String },

    #[error("Scan file {path} has no {location}")]
    MalformedDocument { path: String, location: String },
}

/// Result type for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;
