//! Backend error types

use thiserror::Error;

/// Errors that can occur while talking to the generation backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file '{0}': only .docx documents can be uploaded")]
    UnsupportedFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// Whether this error came from the transport layer rather than the
    /// backend declaring a problem in a well-formed body
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BackendError::Network(_) | BackendError::Api { .. } | BackendError::Io(_)
        )
    }
}
