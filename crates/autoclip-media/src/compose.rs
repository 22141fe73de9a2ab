//! Clip composer: trim, vertical crop and highlight captions in one pass.

use std::path::Path;
use tracing::{debug, info};

use autoclip_models::{ClipSpec, EncodingConfig, HighlightSegment, PlatformProfile};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::{build_compose_filter, CropWindow};
use crate::probe::{probe_video, VideoInfo};

/// A caption shown over `[start, end)` of the rendered clip.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionOverlay {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl CaptionOverlay {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Everything the renderer decides before touching ffmpeg.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlan {
    /// Rendered length; never above the profile cap
    pub trim_duration: f64,
    pub crop: CropWindow,
    /// In highlight order
    pub overlays: Vec<CaptionOverlay>,
}

/// Smallest frame side the encoder accepts.
const MIN_SOURCE_SIDE: u32 = 2;

/// Plan a clip for one platform.
///
/// The clip always starts at 0 and lasts `min(source, cap)`. Highlights that
/// start inside that window get a caption lasting the profile's caption
/// duration, cut at the window end; the rest are dropped.
pub fn plan_clip(
    info: &VideoInfo,
    highlights: &[HighlightSegment],
    profile: &PlatformProfile,
) -> MediaResult<ClipPlan> {
    if info.duration.is_nan() || info.duration <= 0.0 {
        return Err(MediaError::invalid_video("source duration is zero or unknown"));
    }
    if info.width == 0 || info.height == 0 {
        return Err(MediaError::invalid_video("source has no dimensions"));
    }
    if info.width < MIN_SOURCE_SIDE || info.height < MIN_SOURCE_SIDE {
        return Err(MediaError::invalid_video(format!(
            "source is {}x{}; yuv420p output needs at least {}x{}",
            info.width, info.height, MIN_SOURCE_SIDE, MIN_SOURCE_SIDE
        )));
    }

    let trim_duration = info.duration.min(profile.max_duration_secs);
    let crop = CropWindow::centered(info.width, info.height, profile.aspect_ratio);

    let overlays = highlights
        .iter()
        .filter(|h| h.start >= 0.0 && h.start < trim_duration)
        .filter(|h| !h.text.trim().is_empty())
        .map(|h| {
            let end = (h.start + profile.caption_duration_secs).min(trim_duration);
            CaptionOverlay::new(h.start, end, h.text.trim())
        })
        .collect();

    Ok(ClipPlan {
        trim_duration,
        crop,
        overlays,
    })
}

/// Probe, plan and render `spec` to `output`.
pub async fn compose_clip(
    spec: &ClipSpec,
    output: &Path,
    encoding: &EncodingConfig,
) -> MediaResult<ClipPlan> {
    let info = probe_video(&spec.source_file).await?;
    let plan = plan_clip(&info, &spec.highlights, &spec.profile)?;

    let subtitles = spec.cue_file.as_deref().filter(|p| p.exists());
    let filter = build_compose_filter(&plan.crop, &plan.overlays, subtitles);

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    info!(
        source = %spec.source_file.display(),
        output = %output.display(),
        platform = %spec.platform,
        duration = plan.trim_duration,
        captions = plan.overlays.len(),
        burned_subtitles = subtitles.is_some(),
        "Composing clip"
    );

    let cmd = FfmpegCommand::new(&spec.source_file, output)
        .duration(plan.trim_duration)
        .video_filter(filter)
        .encoding(encoding)
        .faststart();

    let clip_secs = plan.trim_duration;
    FfmpegRunner::new()
        .run_with_progress(&cmd, move |p| {
            debug!(
                percent = %format!("{:.1}", p.percent_of(clip_secs)),
                speed = p.speed,
                eta_secs = ?p.eta_secs(clip_secs),
                "Render progress"
            );
        })
        .await?;

    if !output.exists() {
        return Err(MediaError::ffmpeg_failed(
            format!("FFmpeg finished but {} was not written", output.display()),
            None,
            None,
        ));
    }

    info!(output = %output.display(), "Clip composed");
    Ok(plan)
}
