//! SRT caption output.

use std::fmt::Write as _;
use std::path::Path;

use autoclip_models::{format_srt_time, Cue};
use tracing::info;

use crate::error::CaptionResult;

/// Render cues as SRT: one blank-line-separated block per cue.
pub fn render_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            cue.index,
            format_srt_time(cue.start),
            format_srt_time(cue.end),
            cue.text
        );
    }
    out
}

/// Write cues to an SRT file, creating the parent directory if needed.
pub async fn write_srt(path: impl AsRef<Path>, cues: &[Cue]) -> CaptionResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(path, render_srt(cues)).await?;
    info!(path = %path.display(), cues = cues.len(), "Wrote caption file");
    Ok(())
}
