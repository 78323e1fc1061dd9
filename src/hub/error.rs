//! Hub Transport Error Types

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status} during {context}")]
    UnexpectedStatus { status: u16, context: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("No project named '{project}' on the server")]
    ProjectNotFound { project: String },

    #[error("No version named '{version}' under project '{project}'")]
    VersionNotFound { project: String, version: String },

    #[error("No custom field object type named '{object}' on the server")]
    FieldObjectNotFound { object: String },

    #[error("Malformed server response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid transport configuration: {message}")]
    Configuration { message: String },

    #[error("IO error reading upload payload: {message}")]
    Io { message: String },
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
