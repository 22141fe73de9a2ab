//! Pipeline error types.

use std::path::Path;
use thiserror::Error;

use autoclip_models::Stage;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Acquisition failed: {0}")]
    Acquisition(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Never fatal: the caller keeps the untranslated text.
    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Composition failed: {0}")]
    Composition(String),

    #[error("Publishing failed: {0}")]
    Publishing(String),

    /// A prerequisite from an earlier (possibly skipped) stage is absent.
    #[error("Missing artifact for {stage}: {what}")]
    MissingArtifact { stage: Stage, what: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Media error: {0}")]
    Media(#[from] autoclip_media::MediaError),

    #[error("Caption error: {0}")]
    Caption(#[from] autoclip_captions::CaptionError),

    #[error("Publish error: {0}")]
    Publish(#[from] autoclip_publish::PublishError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    pub fn publishing(msg: impl Into<String>) -> Self {
        Self::Publishing(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn missing(stage: Stage, what: impl Into<String>) -> Self {
        Self::MissingArtifact {
            stage,
            what: what.into(),
        }
    }

    pub fn missing_file(stage: Stage, path: &Path) -> Self {
        Self::missing(stage, path.display().to_string())
    }

    /// Whether this error means "skip the item" rather than "the item failed".
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingArtifact { .. })
    }
}
