//! Seams between the orchestrator and external collaborators.
//!
//! Each trait has one production implementation in [`crate::adapters`];
//! tests substitute in-memory fakes.

use std::path::Path;

use async_trait::async_trait;

use autoclip_models::{AcquiredMedia, ClipSpec, Transcript};
use autoclip_publish::VideoMetadata;

use crate::error::PipelineResult;

/// Fetches a remote source into a local directory.
#[async_trait]
pub trait Acquirer: Send + Sync {
    async fn acquire(&self, url: &str, dir: &Path) -> PipelineResult<AcquiredMedia>;
}

/// Speech recognition over a local media file.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, file: &Path) -> PipelineResult<Transcript>;
}

/// Text translation between two language codes.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> PipelineResult<String>;
}

/// Renders one platform clip.
#[async_trait]
pub trait ClipRenderer: Send + Sync {
    async fn render(&self, spec: &ClipSpec, output: &Path) -> PipelineResult<()>;
}

/// Uploads a rendered clip and returns the remote id.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, file: &Path, metadata: &VideoMetadata) -> PipelineResult<String>;
}
