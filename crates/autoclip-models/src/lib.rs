//! Shared data models for the AutoClip pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Source items, pipeline stages and item lifecycle status
//! - Transcripts with segment and word timings
//! - Caption cues and keyword highlights
//! - Platform profiles and clip specifications
//! - Encoding configuration
//! - SRT timestamp formatting and filename sanitization

pub mod cue;
pub mod encoding;
pub mod highlight;
pub mod platform;
pub mod source;
pub mod stage;
pub mod timestamp;
pub mod transcript;
pub mod utils;

// Re-export common types
pub use cue::Cue;
pub use encoding::EncodingConfig;
pub use highlight::HighlightSegment;
pub use platform::{ClipSpec, Platform, PlatformParseError, PlatformProfile};
pub use source::{parse_source_list, AcquiredMedia, ItemStatus, SourceItem};
pub use stage::{Stage, StageFlags};
pub use timestamp::{format_srt_time, parse_srt_time, TimestampError};
pub use transcript::{Segment, Transcript, WordTiming};
pub use utils::{output_file_name, sanitize_base_name};
