//! yt-dlp acquisition.

use std::path::Path;

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use autoclip_media::{download_video, is_supported_url};
use autoclip_models::AcquiredMedia;

use crate::error::{PipelineError, PipelineResult};
use crate::stages::Acquirer;

/// Reject anything that is not an absolute http(s) URL with a host.
pub fn validate_source_url(raw: &str) -> PipelineResult<Url> {
    let url = Url::parse(raw).map_err(|e| PipelineError::acquisition(format!("invalid URL {:?}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PipelineError::acquisition(format!(
            "unsupported URL scheme {:?} in {}",
            url.scheme(),
            raw
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(PipelineError::acquisition(format!("URL has no host: {}", raw)));
    }

    Ok(url)
}

#[derive(Debug, Default, Clone)]
pub struct YtDlpAcquirer;

impl YtDlpAcquirer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Acquirer for YtDlpAcquirer {
    async fn acquire(&self, url: &str, dir: &Path) -> PipelineResult<AcquiredMedia> {
        if !is_supported_url(url) {
            warn!(url = %url, "Host is not a known video platform, trying anyway");
        }

        download_video(url, dir)
            .await
            .map_err(|e| PipelineError::acquisition(e.to_string()))
    }
}
