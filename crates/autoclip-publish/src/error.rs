//! Publishing error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for publishing operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur while authorizing or uploading.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Credential file not found: {0}")]
    CredentialMissing(PathBuf),

    #[error("Credential file is unusable: {0}")]
    CredentialInvalid(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PublishError {
    pub fn credential_invalid(msg: impl Into<String>) -> Self {
        Self::CredentialInvalid(msg.into())
    }

    pub fn refresh_failed(msg: impl Into<String>) -> Self {
        Self::RefreshFailed(msg.into())
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }
}
