//! Caption cue model.

use serde::{Deserialize, Serialize};

/// A timed caption line, numbered from 1 across a whole transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(index: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Same timing and index with different text (used for translations).
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
