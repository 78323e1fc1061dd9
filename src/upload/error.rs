//! Upload Error Types

use crate::hub::error::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload of {path} failed: {source}")]
    UploadFailed {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to write temporary scan file {path}: {message}")]
    TempFile { path: String, message: String },
}

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;
