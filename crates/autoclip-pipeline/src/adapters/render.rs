//! FFmpeg clip rendering.

use std::path::Path;

use async_trait::async_trait;

use autoclip_media::compose_clip;
use autoclip_models::{ClipSpec, EncodingConfig};

use crate::error::{PipelineError, PipelineResult};
use crate::stages::ClipRenderer;

#[derive(Debug, Clone, Default)]
pub struct FfmpegRenderer {
    encoding: EncodingConfig,
}

impl FfmpegRenderer {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self { encoding }
    }
}

#[async_trait]
impl ClipRenderer for FfmpegRenderer {
    async fn render(&self, spec: &ClipSpec, output: &Path) -> PipelineResult<()> {
        compose_clip(spec, output, &self.encoding)
            .await
            .map(|_| ())
            .map_err(|e| PipelineError::composition(e.to_string()))
    }
}
