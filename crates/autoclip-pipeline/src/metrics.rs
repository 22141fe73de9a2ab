//! Run counters.
//!
//! Recorded through the `metrics` facade. The binary installs a Prometheus
//! recorder and can write the rendered counters to a file after the run;
//! embedders without a recorder get no-ops.

use std::path::Path;

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use autoclip_models::Stage;

use crate::error::{PipelineError, PipelineResult};

/// Install the Prometheus recorder for this process.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PipelineResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| PipelineError::config_error(format!("failed to install metrics recorder: {}", e)))
}

/// Write the Prometheus text exposition of every counter to `path`.
pub async fn write_snapshot(handle: &PrometheusHandle, path: &Path) -> PipelineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, handle.render()).await?;
    info!(path = %path.display(), "Wrote metrics snapshot");
    Ok(())
}

/// Metric names as constants for consistency.
pub mod names {
    pub const ITEMS_TOTAL: &str = "autoclip_items_total";
    pub const STAGE_FAILURES_TOTAL: &str = "autoclip_stage_failures_total";
    pub const CLIPS_RENDERED_TOTAL: &str = "autoclip_clips_rendered_total";
    pub const UPLOADS_TOTAL: &str = "autoclip_uploads_total";
    pub const TRANSLATION_FALLBACKS_TOTAL: &str = "autoclip_translation_fallbacks_total";
}

pub fn record_item_outcome(outcome: &'static str) {
    counter!(names::ITEMS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_stage_failure(stage: Stage) {
    counter!(names::STAGE_FAILURES_TOTAL, "stage" => stage.as_str()).increment(1);
}

pub fn record_clip_rendered(platform: &'static str) {
    counter!(names::CLIPS_RENDERED_TOTAL, "platform" => platform).increment(1);
}

pub fn record_upload(platform: &'static str) {
    counter!(names::UPLOADS_TOTAL, "platform" => platform).increment(1);
}

pub fn record_translation_fallback() {
    counter!(names::TRANSLATION_FALLBACKS_TOTAL).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counters_reach_snapshot() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_item_outcome("completed");
            record_item_outcome("completed");
            record_stage_failure(Stage::Compose);
            record_upload("shorts");
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("metrics.prom");
        write_snapshot(&handle, &path).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains(r#"autoclip_items_total{outcome="completed"} 2"#));
        assert!(text.contains(r#"autoclip_stage_failures_total{stage="compose"} 1"#));
        assert!(text.contains(r#"autoclip_uploads_total{platform="shorts"} 1"#));
    }
}
