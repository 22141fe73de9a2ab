//! Caption and highlight engines.
//!
//! This crate provides:
//! - Cue segmentation from segment/word timings
//! - SRT rendering and writing
//! - Keyword-driven highlight extraction

pub mod error;
pub mod highlights;
pub mod segmenter;
pub mod srt;

pub use error::{CaptionError, CaptionResult};
pub use highlights::{extract_highlights, KeywordMatcher, MatchMode};
pub use segmenter::{segment_cues, CueSegmenter, SENTENCE_TERMINATORS};
pub use srt::{render_srt, write_srt};
