//! Source items and their lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::stage::Stage;

/// Lifecycle status of a source item as it moves through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "stage")]
pub enum ItemStatus {
    Pending,
    Acquired,
    Transcribed,
    Captioned,
    Composed,
    Published,
    /// Processing stopped at the given stage.
    Failed(Stage),
}

impl ItemStatus {
    /// Status reached after a stage completes successfully.
    pub fn after(stage: Stage) -> Self {
        match stage {
            Stage::Acquire => ItemStatus::Acquired,
            Stage::Transcribe => ItemStatus::Transcribed,
            Stage::Caption => ItemStatus::Captioned,
            Stage::Compose => ItemStatus::Composed,
            Stage::Publish => ItemStatus::Published,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "pending"),
            ItemStatus::Acquired => write!(f, "acquired"),
            ItemStatus::Transcribed => write!(f, "transcribed"),
            ItemStatus::Captioned => write!(f, "captioned"),
            ItemStatus::Composed => write!(f, "composed"),
            ItemStatus::Published => write!(f, "published"),
            ItemStatus::Failed(stage) => write!(f, "failed at {}", stage),
        }
    }
}

/// A source video to process, identified by its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub url: String,
    pub status: ItemStatus,
}

impl SourceItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: ItemStatus::Pending,
        }
    }

    /// Record that a stage finished successfully.
    pub fn advance(&mut self, stage: Stage) {
        self.status = ItemStatus::after(stage);
    }

    /// Record that a stage failed.
    pub fn fail(&mut self, stage: Stage) {
        self.status = ItemStatus::Failed(stage);
    }
}

/// Local media produced by the acquisition stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquiredMedia {
    /// Path of the downloaded file
    pub path: PathBuf,
    /// Title reported by the source platform
    pub title: String,
    /// Duration in seconds (0 when unknown)
    pub duration_secs: f64,
}

/// Parse a newline-delimited URL list. Lines are trimmed and blank lines ignored.
pub fn parse_source_list(content: &str) -> Vec<SourceItem> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(SourceItem::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_list_skips_blank_lines() {
        let list = "https://youtu.be/a\n\n   \n  https://youtu.be/b  \r\nhttps://youtu.be/c\n";
        let items = parse_source_list(list);
        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["https://youtu.be/a", "https://youtu.be/b", "https://youtu.be/c"]);
        assert!(items.iter().all(|i| i.status == ItemStatus::Pending));
    }

    #[test]
    fn test_item_lifecycle() {
        let mut item = SourceItem::new("https://youtu.be/a");
        item.advance(Stage::Acquire);
        assert_eq!(item.status, ItemStatus::Acquired);
        item.fail(Stage::Transcribe);
        assert!(item.status.is_failed());
        assert_eq!(item.status.to_string(), "failed at transcribe");
    }
}
