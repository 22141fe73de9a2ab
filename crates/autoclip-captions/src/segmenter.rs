//! Subtitle segmentation.
//!
//! Converts transcript segments into caption cues. Words are accumulated into
//! a running cue and a cue boundary is emitted when a word ends a sentence or
//! when the segment runs out of words.
//!
//! # Timing rules
//!
//! - A cue ends at the end time of the word that closed it.
//! - The next cue starts where the previous cue ended, not where its own first
//!   word starts. Short pauses between sentences are therefore absorbed into
//!   the following cue instead of showing as a gap.
//! - The first cue of a segment starts at the segment start, or at the end of
//!   the previous cue if the recognizer produced overlapping segments.
//! - The last cue of a segment ends no earlier than the segment end.
//!
//! Together these keep cues non-overlapping, strictly positive in duration
//! and numbered without gaps across the whole transcript.

use autoclip_models::{Cue, Segment, Transcript, WordTiming};
use tracing::debug;

/// Word endings that close a cue.
pub const SENTENCE_TERMINATORS: &[&str] = &[".", "!", "?", "...", ";", ":"];

/// Smallest duration given to a cue whose words carry no usable timing.
const MIN_CUE_SECS: f64 = 0.001;

/// Closing punctuation that may trail a terminator (`"Done."`, `(really?)`).
const TRAILING_CLOSERS: &[char] = &['"', '\'', ')', ']', '»', '”', '’'];

/// Segment a whole transcript into cues numbered from 1.
pub fn segment_cues(transcript: &Transcript) -> Vec<Cue> {
    let mut segmenter = CueSegmenter::new();
    for segment in &transcript.segments {
        segmenter.push_segment(segment);
    }
    let cues = segmenter.finish();
    debug!(
        segments = transcript.segments.len(),
        cues = cues.len(),
        "Segmented transcript into cues"
    );
    cues
}

/// Incremental cue builder that keeps numbering and timing continuity across
/// segments.
#[derive(Debug, Default)]
pub struct CueSegmenter {
    cues: Vec<Cue>,
    last_end: Option<f64>,
}

impl CueSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment one transcript segment, returning how many cues it produced.
    ///
    /// Blank segments produce nothing and do not consume an index.
    pub fn push_segment(&mut self, segment: &Segment) -> usize {
        if segment.is_blank() {
            return 0;
        }

        let words = timed_words(segment);
        if words.is_empty() {
            return 0;
        }

        let before = self.cues.len();
        let mut running_start = round_ms(match self.last_end {
            Some(prev_end) => segment.start.max(prev_end),
            None => segment.start,
        });
        let mut buffer: Vec<&str> = Vec::new();
        let last = words.len() - 1;

        for (i, word) in words.iter().enumerate() {
            buffer.push(word.word.as_str());

            let is_last = i == last;
            if !is_last && !ends_sentence(&word.word) {
                continue;
            }

            let mut end = round_ms(word.end);
            if is_last {
                end = end.max(round_ms(segment.end));
                if end <= running_start {
                    end = round_ms(running_start + MIN_CUE_SECS);
                }
            } else if end <= running_start {
                // No usable time left for this sentence; carry it into the next cue.
                continue;
            }

            let index = self.cues.len() as u32 + 1;
            let text = buffer.join(" ").trim().to_string();
            self.cues.push(Cue::new(index, running_start, end, text));

            running_start = end;
            buffer.clear();
        }

        self.last_end = Some(running_start);
        self.cues.len() - before
    }

    /// Cues produced so far, in index order.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn finish(self) -> Vec<Cue> {
        self.cues
    }
}

/// Snap a time to whole milliseconds, the resolution of an SRT timestamp.
fn round_ms(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Whether a word closes a sentence.
fn ends_sentence(word: &str) -> bool {
    let word = word.trim_end_matches(TRAILING_CLOSERS);
    SENTENCE_TERMINATORS.iter().any(|t| word.ends_with(t))
}

/// Words of a segment with timings.
///
/// Recognizer word timings are used when present; otherwise the segment span
/// is split evenly across its whitespace-separated words.
fn timed_words(segment: &Segment) -> Vec<WordTiming> {
    let recognized: Vec<WordTiming> = segment
        .words
        .iter()
        .filter(|w| !w.word.trim().is_empty())
        .map(|w| WordTiming::new(w.word.trim(), w.start, w.end))
        .collect();

    if !recognized.is_empty() {
        return recognized;
    }

    let tokens: Vec<&str> = segment.text.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let span = (segment.end - segment.start).max(0.0);
    let step = span / tokens.len() as f64;
    let last = tokens.len() - 1;

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let start = segment.start + step * i as f64;
            let end = if i == last {
                segment.start + span
            } else {
                segment.start + step * (i + 1) as f64
            };
            WordTiming::new(*token, start, end)
        })
        .collect()
}
