//! Target platforms and their composition profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::highlight::HighlightSegment;

/// Short-form vertical aspect ratio (width / height).
pub const VERTICAL_ASPECT_RATIO: f64 = 9.0 / 16.0;

/// Composition limits for one target platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Hard cap on the rendered clip length (seconds)
    pub max_duration_secs: f64,
    /// Output width / height
    pub aspect_ratio: f64,
    /// How long each highlight caption stays on screen (seconds)
    pub caption_duration_secs: f64,
}

/// Profile shared by the current short-form vertical targets.
///
/// Shorts and TikTok use the same numbers today; they are kept as separate
/// table entries so either can diverge without touching the composer.
const SHORT_FORM_VERTICAL: PlatformProfile = PlatformProfile {
    max_duration_secs: 60.0,
    aspect_ratio: VERTICAL_ASPECT_RATIO,
    caption_duration_secs: 3.0,
};

/// Publishing targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// YouTube Shorts
    Shorts,
    /// TikTok
    Tiktok,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[Platform::Shorts, Platform::Tiktok];

    /// Returns the platform name as used in output filenames.
    pub fn suffix(&self) -> &'static str {
        match self {
            Platform::Shorts => "shorts",
            Platform::Tiktok => "tiktok",
        }
    }

    /// Static composition profile for this platform.
    pub fn profile(&self) -> PlatformProfile {
        match self {
            Platform::Shorts => SHORT_FORM_VERTICAL,
            Platform::Tiktok => SHORT_FORM_VERTICAL,
        }
    }

    /// Parse a comma-separated platform list, dropping unknown names and duplicates.
    pub fn parse_list(list: &str) -> Vec<Platform> {
        let mut result = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Ok(platform) = name.parse::<Platform>() {
                if !result.contains(&platform) {
                    result.push(platform);
                }
            }
        }
        result
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shorts" | "youtube" | "youtube_shorts" => Ok(Platform::Shorts),
            "tiktok" => Ok(Platform::Tiktok),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown platform: {0}")]
pub struct PlatformParseError(String);

/// Everything needed to render one platform clip from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSpec {
    /// Acquired source video
    pub source_file: PathBuf,
    /// Sanitized base name of the source
    pub base_name: String,
    pub platform: Platform,
    pub profile: PlatformProfile,
    /// Highlights in transcript order
    pub highlights: Vec<HighlightSegment>,
    /// Optional SRT cue track to burn in alongside the highlight overlays
    pub cue_file: Option<PathBuf>,
}

impl ClipSpec {
    pub fn new(
        source_file: impl Into<PathBuf>,
        base_name: impl Into<String>,
        platform: Platform,
        highlights: Vec<HighlightSegment>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            base_name: base_name.into(),
            platform,
            profile: platform.profile(),
            highlights,
            cue_file: None,
        }
    }

    pub fn with_cue_file(mut self, cue_file: impl Into<PathBuf>) -> Self {
        self.cue_file = Some(cue_file.into());
        self
    }

    /// Deterministic output filename: `<base>_<suffix>.mp4`.
    pub fn output_file_name(&self) -> String {
        crate::utils::output_file_name(&self.base_name, self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            Platform::parse_list("tiktok, shorts,bogus,TikTok"),
            vec![Platform::Tiktok, Platform::Shorts]
        );
        assert!(Platform::parse_list("").is_empty());
    }

    #[test]
    fn test_profiles_are_vertical() {
        for platform in Platform::ALL {
            let profile = platform.profile();
            assert!(profile.aspect_ratio < 1.0);
            assert!(profile.max_duration_secs > 0.0);
            assert!(profile.caption_duration_secs > 0.0);
        }
    }

    #[test]
    fn test_clip_spec_output_name() {
        let spec = ClipSpec::new("in/My_Video.mp4", "My_Video", Platform::Tiktok, Vec::new());
        assert_eq!(spec.output_file_name(), "My_Video_tiktok.mp4");
        assert_eq!(spec.profile, Platform::Tiktok.profile());
    }
}
