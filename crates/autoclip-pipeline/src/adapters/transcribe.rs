//! Speech-to-text through the `whisper` command line.
//!
//! The model is loaded by each CLI invocation; the adapter itself only holds
//! settings and is shared read-only across the run.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use autoclip_models::Transcript;

use crate::error::{PipelineError, PipelineResult};
use crate::stages::SpeechToText;

#[derive(Debug, Clone)]
pub struct WhisperCli {
    binary: String,
    model: String,
}

impl WhisperCli {
    pub fn new(binary: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
        }
    }

    /// Fail early when the executable is not on PATH.
    pub fn check_available(&self) -> PipelineResult<PathBuf> {
        which::which(&self.binary)
            .map_err(|_| PipelineError::transcription(format!("{} not found in PATH", self.binary)))
    }

    fn build_args(&self, file: &Path, output_dir: &Path) -> Vec<String> {
        vec![
            file.to_string_lossy().to_string(),
            "--model".to_string(),
            self.model.clone(),
            "--task".to_string(),
            "transcribe".to_string(),
            "--output_format".to_string(),
            "json".to_string(),
            "--output_dir".to_string(),
            output_dir.to_string_lossy().to_string(),
            "--word_timestamps".to_string(),
            "True".to_string(),
            "--temperature".to_string(),
            "0".to_string(),
            "--best_of".to_string(),
            "3".to_string(),
            "--beam_size".to_string(),
            "3".to_string(),
            "--fp16".to_string(),
            "False".to_string(),
            "--verbose".to_string(),
            "False".to_string(),
        ]
    }
}

#[async_trait]
impl SpeechToText for WhisperCli {
    async fn transcribe(&self, file: &Path) -> PipelineResult<Transcript> {
        if !file.exists() {
            return Err(PipelineError::transcription(format!(
                "source file not found: {}",
                file.display()
            )));
        }
        self.check_available()?;

        let output_dir = tempfile::tempdir()?;
        let args = self.build_args(file, output_dir.path());
        info!(file = %file.display(), model = %self.model, "Transcribing");
        debug!("Running {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("unknown error");
            return Err(PipelineError::transcription(format!(
                "{} exited with {}: {}",
                self.binary, output.status, last
            )));
        }

        let json_path = find_json_output(output_dir.path(), file).await?;
        let raw = tokio::fs::read_to_string(&json_path).await?;
        let transcript = Transcript::from_json(&raw)
            .map_err(|e| PipelineError::transcription(format!("unreadable whisper output: {}", e)))?;

        info!(
            file = %file.display(),
            language = %transcript.language,
            segments = transcript.segments.len(),
            "Transcription complete"
        );
        Ok(transcript)
    }
}

/// Whisper names its output after the input stem; fall back to any `.json`.
async fn find_json_output(dir: &Path, input: &Path) -> PipelineResult<PathBuf> {
    if let Some(stem) = input.file_stem() {
        let expected = dir.join(format!("{}.json", stem.to_string_lossy()));
        if expected.exists() {
            return Ok(expected);
        }
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            return Ok(path);
        }
    }

    Err(PipelineError::transcription("whisper produced no JSON output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let whisper = WhisperCli::new("whisper", "medium");
        let args = whisper.build_args(Path::new("/in/a.mp4"), Path::new("/tmp/w"));
        assert_eq!(args[0], "/in/a.mp4");
        assert!(args.windows(2).any(|w| w == ["--model", "medium"]));
        assert!(args.windows(2).any(|w| w == ["--word_timestamps", "True"]));
        assert!(args.windows(2).any(|w| w == ["--beam_size", "3"]));
        assert!(args.windows(2).any(|w| w == ["--output_dir", "/tmp/w"]));
        assert!(!args.iter().any(|a| a == "--language"));
    }

    #[tokio::test]
    async fn test_find_json_output() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("talk.json"), "{}").await.unwrap();
        let found = find_json_output(dir.path(), Path::new("/in/talk.mp4")).await.unwrap();
        assert_eq!(found, dir.path().join("talk.json"));

        let found = find_json_output(dir.path(), Path::new("/in/other.mp4")).await.unwrap();
        assert_eq!(found, dir.path().join("talk.json"));

        let empty = tempfile::tempdir().unwrap();
        assert!(find_json_output(empty.path(), Path::new("a.mp4")).await.is_err());
    }

    #[test]
    fn test_whisper_json_parses() {
        let raw = r#"{
            "text": " Hello there. General Kenobi.",
            "segments": [{
                "id": 0, "seek": 0, "start": 0.0, "end": 2.4, "text": " Hello there.",
                "tokens": [1, 2], "avg_logprob": -0.2,
                "words": [
                    {"word": " Hello", "start": 0.0, "end": 0.6, "probability": 0.9},
                    {"word": " there.", "start": 0.6, "end": 1.1, "probability": 0.9}
                ]
            }],
            "language": "en"
        }"#;
        let transcript = Transcript::from_json(raw).unwrap();
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.segments[0].words.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_source() {
        let whisper = WhisperCli::new("whisper", "base");
        let err = whisper.transcribe(Path::new("/definitely/not/here.mp4")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Transcription(_)));
    }
}
