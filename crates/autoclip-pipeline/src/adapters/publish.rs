//! YouTube publishing.

use std::path::Path;

use async_trait::async_trait;

use autoclip_publish::{CredentialStore, VideoMetadata, YouTubeUploader};

use crate::error::{PipelineError, PipelineResult};
use crate::stages::Publisher;

#[derive(Debug, Clone)]
pub struct YouTubePublisher {
    uploader: YouTubeUploader,
}

impl YouTubePublisher {
    pub fn new(uploader: YouTubeUploader) -> Self {
        Self { uploader }
    }

    /// Publisher using the credential file at `token_path`.
    pub fn from_token_file(http: reqwest::Client, token_path: &Path) -> Self {
        let credentials = CredentialStore::new(token_path, http.clone());
        Self::new(YouTubeUploader::new(http, credentials))
    }
}

#[async_trait]
impl Publisher for YouTubePublisher {
    async fn publish(&self, file: &Path, metadata: &VideoMetadata) -> PipelineResult<String> {
        self.uploader
            .upload(file, metadata)
            .await
            .map_err(|e| PipelineError::publishing(e.to_string()))
    }
}
