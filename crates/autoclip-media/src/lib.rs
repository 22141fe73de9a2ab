//! FFmpeg and yt-dlp CLI wrappers.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - FFprobe video inspection
//! - Source acquisition through yt-dlp
//! - Crop and caption overlay filter graphs
//! - The clip composer that renders platform-sized shorts

pub mod command;
pub mod compose;
pub mod download;
pub mod error;
pub mod filters;
pub mod probe;
pub mod progress;

pub use command::{check_ffmpeg, check_ffprobe, check_ytdlp, FfmpegCommand, FfmpegRunner};
pub use compose::{compose_clip, plan_clip, CaptionOverlay, ClipPlan};
pub use download::{download_video, is_supported_url};
pub use error::{MediaError, MediaResult};
pub use filters::{build_compose_filter, CropWindow};
pub use probe::{probe_video, VideoInfo};
pub use progress::FfmpegProgress;
