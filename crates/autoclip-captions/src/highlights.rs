//! Keyword-driven highlight extraction.
//!
//! Each transcript segment contributes at most one highlight: keywords are
//! tested in configured order and the first hit wins.

use std::fmt;
use std::str::FromStr;

use autoclip_models::{HighlightSegment, Transcript};
use regex::Regex;
use tracing::debug;

use crate::error::{CaptionError, CaptionResult};

/// How a keyword must appear in segment text. Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Keyword may appear anywhere, including inside a longer word
    #[default]
    Substring,
    /// Keyword must be delimited by non-word characters or text edges
    WholeWord,
}

impl FromStr for MatchMode {
    type Err = CaptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" | "" => Ok(MatchMode::Substring),
            "word" | "whole_word" => Ok(MatchMode::WholeWord),
            other => Err(CaptionError::invalid_keyword(
                other,
                "match mode must be 'substring' or 'word'",
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::WholeWord => write!(f, "word"),
        }
    }
}

#[derive(Debug, Clone)]
enum Pattern {
    Substring(String),
    WholeWord(Regex),
}

impl Pattern {
    fn is_match(&self, lowered: &str, original: &str) -> bool {
        match self {
            Pattern::Substring(needle) => lowered.contains(needle.as_str()),
            Pattern::WholeWord(re) => re.is_match(original),
        }
    }
}

/// Ordered, pre-compiled keyword set.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<(String, Pattern)>,
    mode: MatchMode,
}

impl KeywordMatcher {
    /// Compile keywords in order. Blank keywords are dropped.
    pub fn new<I, S>(keywords: I, mode: MatchMode) -> CaptionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }

            let pattern = match mode {
                MatchMode::Substring => Pattern::Substring(keyword.to_lowercase()),
                MatchMode::WholeWord => {
                    let source = format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(keyword));
                    let re = Regex::new(&source)
                        .map_err(|e| CaptionError::invalid_keyword(keyword, e.to_string()))?;
                    Pattern::WholeWord(re)
                }
            };
            compiled.push((keyword.to_string(), pattern));
        }

        Ok(Self {
            keywords: compiled,
            mode,
        })
    }

    /// Parse a comma-separated keyword list.
    pub fn from_list(list: &str, mode: MatchMode) -> CaptionResult<Self> {
        Self::new(list.split(','), mode)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// The first configured keyword found in `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .find(|(_, pattern)| pattern.is_match(&lowered, text))
            .map(|(keyword, _)| keyword.as_str())
    }
}

/// Scan transcript segments in order and keep those mentioning a keyword.
pub fn extract_highlights(transcript: &Transcript, matcher: &KeywordMatcher) -> Vec<HighlightSegment> {
    let highlights: Vec<HighlightSegment> = transcript
        .segments
        .iter()
        .filter_map(|segment| {
            matcher.first_match(&segment.text).map(|keyword| {
                HighlightSegment::new(segment.start, segment.end, segment.text.trim(), keyword)
            })
        })
        .collect();

    debug!(
        segments = transcript.segments.len(),
        highlights = highlights.len(),
        mode = %matcher.mode(),
        "Extracted keyword highlights"
    );
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoclip_models::Segment;

    fn transcript(texts: &[&str]) -> Transcript {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Segment::new(i as f64 * 5.0, i as f64 * 5.0 + 4.0, *t))
            .collect();
        Transcript::new("pt", segments)
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = KeywordMatcher::new(["importante"], MatchMode::Substring).unwrap();
        let highlights = extract_highlights(&transcript(&["This is IMPORTANTE info"]), &matcher);
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].matched_keyword, "importante");
        assert_eq!(highlights[0].text, "This is IMPORTANTE info");

        let matcher = KeywordMatcher::new(["importante"], MatchMode::WholeWord).unwrap();
        assert_eq!(matcher.first_match("This is IMPORTANTE info"), Some("importante"));
    }

    #[test]
    fn test_first_keyword_wins() {
        let matcher = KeywordMatcher::new(["secret", "tip"], MatchMode::Substring).unwrap();
        let highlights = extract_highlights(
            &transcript(&["A tip about a secret", "nothing here", "one more tip"]),
            &matcher,
        );

        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].matched_keyword, "secret");
        assert_eq!(highlights[0].start, 0.0);
        assert_eq!(highlights[1].matched_keyword, "tip");
        assert_eq!(highlights[1].start, 10.0);
    }

    #[test]
    fn test_whole_word_rejects_partial_words() {
        let substring = KeywordMatcher::new(["tip"], MatchMode::Substring).unwrap();
        let whole = KeywordMatcher::new(["tip"], MatchMode::WholeWord).unwrap();

        assert!(substring.first_match("multiple choices").is_some());
        assert!(whole.first_match("multiple choices").is_none());
        assert!(whole.first_match("Tip: stay hydrated").is_some());
        assert!(whole.first_match("the last tip.").is_some());
    }

    #[test]
    fn test_whole_word_escapes_keyword() {
        let whole = KeywordMatcher::new(["c++"], MatchMode::WholeWord).unwrap();
        assert!(whole.first_match("I love C++ a lot").is_some());
        assert!(whole.first_match("I love c a lot").is_none());
    }

    #[test]
    fn test_from_list_drops_blank_keywords() {
        let matcher = KeywordMatcher::from_list(" , dica,, ", MatchMode::Substring).unwrap();
        assert!(!matcher.is_empty());
        assert_eq!(matcher.first_match("uma DICA boa"), Some("dica"));

        let empty = KeywordMatcher::from_list("", MatchMode::Substring).unwrap();
        assert!(empty.is_empty());
        assert!(extract_highlights(&transcript(&["anything"]), &empty).is_empty());
    }

    #[test]
    fn test_match_mode_parsing() {
        assert_eq!("word".parse::<MatchMode>().unwrap(), MatchMode::WholeWord);
        assert_eq!("Substring".parse::<MatchMode>().unwrap(), MatchMode::Substring);
        assert!("fuzzy".parse::<MatchMode>().is_err());
    }
}
