//! Speech-to-text transcript models.
//!
//! The JSON layout matches what the transcription stage writes to
//! `transcript_dir/<base>.json`:
//!
//! ```json
//! { "language": "en", "segments": [{ "start": 0.0, "end": 2.5, "text": "Hi." }], "text": "Hi." }
//! ```
//!
//! Extra fields emitted by the recognizer (ids, tokens, probabilities) are ignored.

use serde::{Deserialize, Serialize};

/// Timing of a single recognized word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl WordTiming {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// A timed span of recognized speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Recognized text
    pub text: String,
    /// Word-level timings, in order, when the recognizer provided them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordTiming>,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
        }
    }

    /// Attach word timings.
    pub fn with_words(mut self, words: Vec<WordTiming>) -> Self {
        self.words = words;
        self
    }

    /// Whether the segment carries no speech text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Full transcript of one source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Detected language code (e.g. "en", "pt")
    pub language: String,
    /// Ordered speech segments
    pub segments: Vec<Segment>,
    /// Full recognized text
    #[serde(default)]
    pub text: String,
}

impl Transcript {
    /// Build a transcript, deriving the full text from the segments.
    pub fn new(language: impl Into<String>, segments: Vec<Segment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            language: language.into(),
            segments,
            text,
        }
    }

    /// Parse a transcript from its JSON representation.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON (non-ASCII text is kept as-is).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// End of the last segment, or 0 for an empty transcript.
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.end).fold(0.0, f64::max)
    }
}
