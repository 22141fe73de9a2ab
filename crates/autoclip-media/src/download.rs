//! Source acquisition using yt-dlp.
//!
//! yt-dlp runs with `--dump-json --no-simulate`, so one invocation both
//! downloads the file and prints the metadata we need (title, duration and
//! the final merged file path) on stdout.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use autoclip_models::AcquiredMedia;

use crate::command::check_ytdlp;
use crate::error::{MediaError, MediaResult};

/// Best mp4 video + m4a audio, falling back to the best single file.
pub const DOWNLOAD_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Files are stored by video id; titles only feed the base name.
const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

#[derive(Debug, Deserialize)]
struct DumpInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    requested_downloads: Vec<RequestedDownload>,
    #[serde(default, rename = "_filename")]
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RequestedDownload {
    #[serde(default)]
    filepath: Option<String>,
    #[serde(default, rename = "_filename")]
    filename: Option<String>,
}

/// Download `url` into `dir` and describe the resulting file.
pub async fn download_video(url: &str, dir: impl AsRef<Path>) -> MediaResult<AcquiredMedia> {
    let dir = dir.as_ref();
    check_ytdlp()?;
    tokio::fs::create_dir_all(dir).await?;

    info!(url = %url, dir = %dir.display(), "Downloading source video");

    let args = build_download_args(url, dir);
    debug!("Running yt-dlp {}", args.join(" "));

    let output = Command::new("yt-dlp")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);
        let last = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown error");
        return Err(MediaError::download_failed(format!("yt-dlp failed: {}", last)));
    }

    let media = parse_dump_output(&String::from_utf8_lossy(&output.stdout), dir)?;

    if !media.path.exists() {
        return Err(MediaError::download_failed(format!(
            "yt-dlp reported {} but the file is missing",
            media.path.display()
        )));
    }

    info!(
        path = %media.path.display(),
        title = %media.title,
        duration_secs = media.duration_secs,
        "Downloaded source video"
    );
    Ok(media)
}

fn build_download_args(url: &str, dir: &Path) -> Vec<String> {
    vec![
        "--no-simulate".to_string(),
        "--dump-json".to_string(),
        "--no-playlist".to_string(),
        "--no-progress".to_string(),
        "-f".to_string(),
        DOWNLOAD_FORMAT.to_string(),
        "--merge-output-format".to_string(),
        "mp4".to_string(),
        "-o".to_string(),
        dir.join(OUTPUT_TEMPLATE).to_string_lossy().to_string(),
        url.to_string(),
    ]
}

/// Read the last JSON line yt-dlp printed.
///
/// `requested_downloads[].filepath` is the post-merge path; `_filename` is
/// only the pre-merge guess and is used as a fallback.
fn parse_dump_output(stdout: &str, dir: &Path) -> MediaResult<AcquiredMedia> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| l.starts_with('{'))
        .ok_or_else(|| MediaError::download_failed("yt-dlp printed no metadata"))?;

    let info: DumpInfo = serde_json::from_str(line)?;

    let path = info
        .requested_downloads
        .iter()
        .rev()
        .find_map(|d| d.filepath.clone().or_else(|| d.filename.clone()))
        .or(info.filename)
        .map(PathBuf::from)
        .ok_or_else(|| MediaError::download_failed("yt-dlp did not report an output path"))?;

    let path = if path.is_relative() && !path.starts_with(dir) {
        dir.join(path)
    } else {
        path
    };

    Ok(AcquiredMedia {
        path,
        title: info.title.unwrap_or_default(),
        duration_secs: info.duration.unwrap_or(0.0),
    })
}

/// Check if a URL is a supported video platform.
pub fn is_supported_url(url: &str) -> bool {
    let supported_domains = [
        "youtube.com",
        "youtu.be",
        "vimeo.com",
        "twitter.com",
        "x.com",
        "twitch.tv",
        "tiktok.com",
    ];

    supported_domains.iter().any(|domain| url.contains(domain))
}
