//! Pipeline configuration.
//!
//! Built once from the environment (after `.env` is loaded) and passed by
//! reference to every component.

use std::path::PathBuf;

use autoclip_captions::MatchMode;
use autoclip_models::{EncodingConfig, Platform};

use crate::error::{PipelineError, PipelineResult};

pub const DEFAULT_KEYWORDS: &str = "importante,important,segredo,secret,dica,tip";
pub const DEFAULT_TRANSLATE_URL: &str = "http://localhost:5000/translate";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Acquired originals and `manifest.json`
    pub input_dir: PathBuf,
    /// Transcripts and cue files
    pub transcript_dir: PathBuf,
    /// Rendered clips
    pub final_dir: PathBuf,
    pub whisper_model: String,
    pub whisper_binary: String,
    /// Target caption language
    pub language: String,
    pub translate_url: String,
    pub translate_api_key: Option<String>,
    /// Highlight keywords in priority order
    pub highlight_keywords: Vec<String>,
    pub highlight_match: MatchMode,
    pub platforms: Vec<Platform>,
    /// Burn the full cue track into every clip
    pub burn_subtitles: bool,
    pub default_title: String,
    pub default_description: String,
    pub default_tags: Vec<String>,
    pub youtube_token_path: PathBuf,
    pub encoding: EncodingConfig,
    /// Prometheus text snapshot written after each run
    pub metrics_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./videos/originals"),
            transcript_dir: PathBuf::from("./videos/transcripts"),
            final_dir: PathBuf::from("./videos/final"),
            whisper_model: "base".to_string(),
            whisper_binary: "whisper".to_string(),
            language: "pt".to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translate_api_key: None,
            highlight_keywords: split_list(DEFAULT_KEYWORDS),
            highlight_match: MatchMode::Substring,
            platforms: Platform::ALL.to_vec(),
            burn_subtitles: false,
            default_title: "Vídeo Automático".to_string(),
            default_description: "Vídeo processado automaticamente".to_string(),
            default_tags: split_list("automacao,video,shorts"),
            youtube_token_path: PathBuf::from("token.json"),
            encoding: EncodingConfig::default(),
            metrics_path: None,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> PipelineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let highlight_match = match get("HIGHLIGHT_MATCH") {
            Some(mode) => mode
                .parse()
                .map_err(|e| PipelineError::config_error(format!("HIGHLIGHT_MATCH: {}", e)))?,
            None => defaults.highlight_match,
        };

        let platforms = match get("PLATFORMS") {
            Some(list) => {
                let parsed = Platform::parse_list(&list);
                if parsed.is_empty() {
                    return Err(PipelineError::config_error(format!(
                        "PLATFORMS names no known platform: {}",
                        list
                    )));
                }
                parsed
            }
            None => defaults.platforms,
        };

        let burn_subtitles = match get("BURN_SUBTITLES") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| PipelineError::config_error(format!("BURN_SUBTITLES: {}", v)))?,
            None => defaults.burn_subtitles,
        };

        let mut encoding = defaults.encoding;
        if let Some(crf) = get("ENCODING_CRF") {
            encoding.crf = crf
                .parse()
                .map_err(|_| PipelineError::config_error(format!("ENCODING_CRF: {}", crf)))?;
        }
        if let Some(preset) = get("ENCODING_PRESET") {
            encoding.preset = preset;
        }

        Ok(Self {
            input_dir: get("PATHS_INPUT_DIR").map(PathBuf::from).unwrap_or(defaults.input_dir),
            transcript_dir: get("PATHS_TRANSCRIPT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.transcript_dir),
            final_dir: get("PATHS_FINAL_DIR").map(PathBuf::from).unwrap_or(defaults.final_dir),
            whisper_model: get("WHISPER_MODEL").unwrap_or(defaults.whisper_model),
            whisper_binary: get("WHISPER_BINARY").unwrap_or(defaults.whisper_binary),
            language: get("LANGUAGE").unwrap_or(defaults.language),
            translate_url: get("TRANSLATE_URL").unwrap_or(defaults.translate_url),
            translate_api_key: get("TRANSLATE_API_KEY"),
            highlight_keywords: get("HIGHLIGHT_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.highlight_keywords),
            highlight_match,
            platforms,
            burn_subtitles,
            default_title: get("DEFAULT_TITLE").unwrap_or(defaults.default_title),
            default_description: get("DEFAULT_DESCRIPTION").unwrap_or(defaults.default_description),
            default_tags: get("DEFAULT_TAGS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.default_tags),
            youtube_token_path: get("YOUTUBE_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.youtube_token_path),
            encoding,
            metrics_path: get("METRICS_PATH").map(PathBuf::from),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
