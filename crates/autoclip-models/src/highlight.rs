//! Keyword highlight models.

use serde::{Deserialize, Serialize};

/// A transcript segment selected because it mentions a configured keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Segment text, trimmed
    pub text: String,
    /// The keyword (as configured) that selected this segment
    pub matched_keyword: String,
}

impl HighlightSegment {
    pub fn new(
        start: f64,
        end: f64,
        text: impl Into<String>,
        matched_keyword: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            matched_keyword: matched_keyword.into(),
        }
    }
}
