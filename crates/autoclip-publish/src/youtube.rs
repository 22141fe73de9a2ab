//! YouTube Data API resumable upload.
//!
//! Two requests: a metadata POST that opens an upload session (returned in
//! the `Location` header), then a single PUT of the whole file to that
//! session. The final response is the created video resource.

use std::path::Path;

use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{Body, Client};
use serde::Deserialize;
use tracing::{debug, info};

use crate::credentials::CredentialStore;
use crate::error::{PublishError, PublishResult};
use crate::metadata::VideoMetadata;

/// Production `videos.insert` upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

const VIDEO_CONTENT_TYPE: &str = "video/mp4";

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
}

/// Uploads clips to the authorized channel.
#[derive(Debug, Clone)]
pub struct YouTubeUploader {
    http: Client,
    credentials: CredentialStore,
    upload_url: String,
}

impl YouTubeUploader {
    pub fn new(http: Client, credentials: CredentialStore) -> Self {
        Self {
            http,
            credentials,
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
        }
    }

    /// Point the uploader at another endpoint.
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Upload `file` and return the new video id.
    pub async fn upload(&self, file: &Path, metadata: &VideoMetadata) -> PublishResult<String> {
        let size = match tokio::fs::metadata(file).await {
            Ok(m) => m.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PublishError::FileNotFound(file.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let access_token = self.credentials.access_token().await?;
        let bearer = format!("Bearer {}", access_token);

        info!(file = %file.display(), title = %metadata.title, size, "Starting YouTube upload");

        let response = self
            .http
            .post(&self.upload_url)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .header(AUTHORIZATION, &bearer)
            .header("X-Upload-Content-Type", VIDEO_CONTENT_TYPE)
            .header("X-Upload-Content-Length", size.to_string())
            .json(&metadata.to_resource())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::upload_failed(format!(
                "session request returned {}: {}",
                status, body
            )));
        }

        let session_url = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| PublishError::upload_failed("no upload session in response"))?;
        debug!(session = %session_url, "Opened upload session");

        let body = Body::from(tokio::fs::File::open(file).await?);
        let response = self
            .http
            .put(&session_url)
            .header(AUTHORIZATION, &bearer)
            .header(CONTENT_TYPE, VIDEO_CONTENT_TYPE)
            .header(CONTENT_LENGTH, size)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::upload_failed(format!(
                "upload returned {}: {}",
                status, body
            )));
        }

        let video: VideoResource = response
            .json()
            .await
            .map_err(|e| PublishError::upload_failed(format!("invalid upload response: {}", e)))?;

        info!(file = %file.display(), video_id = %video.id, "Uploaded to YouTube");
        Ok(video.id)
    }
}
