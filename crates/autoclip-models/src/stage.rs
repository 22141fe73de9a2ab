//! Pipeline stages and per-run stage toggles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Acquire,
    Transcribe,
    Caption,
    Compose,
    Publish,
}

impl Stage {
    /// All stages in their fixed execution order.
    pub const ALL: &'static [Stage] = &[
        Stage::Acquire,
        Stage::Transcribe,
        Stage::Caption,
        Stage::Compose,
        Stage::Publish,
    ];

    /// Stage name as used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Acquire => "acquire",
            Stage::Transcribe => "transcribe",
            Stage::Caption => "caption",
            Stage::Compose => "compose",
            Stage::Publish => "publish",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which stages run during a pipeline invocation.
///
/// Disabling a stage never reorders the others; a disabled stage is a no-op
/// that relies on artifacts left on disk by an earlier run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFlags {
    pub acquire: bool,
    pub transcribe: bool,
    pub caption: bool,
    pub compose: bool,
    pub publish: bool,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl StageFlags {
    /// Every stage enabled.
    pub fn all() -> Self {
        Self {
            acquire: true,
            transcribe: true,
            caption: true,
            compose: true,
            publish: true,
        }
    }

    /// Every stage disabled.
    pub fn none() -> Self {
        Self {
            acquire: false,
            transcribe: false,
            caption: false,
            compose: false,
            publish: false,
        }
    }

    /// Whether the given stage should run.
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Acquire => self.acquire,
            Stage::Transcribe => self.transcribe,
            Stage::Caption => self.caption,
            Stage::Compose => self.compose,
            Stage::Publish => self.publish,
        }
    }

    /// Returns flags with a single stage toggled.
    pub fn with(mut self, stage: Stage, enabled: bool) -> Self {
        match stage {
            Stage::Acquire => self.acquire = enabled,
            Stage::Transcribe => self.transcribe = enabled,
            Stage::Caption => self.caption = enabled,
            Stage::Compose => self.compose = enabled,
            Stage::Publish => self.publish = enabled,
        }
        self
    }

    /// Whether any stage is enabled at all.
    pub fn any_enabled(&self) -> bool {
        Stage::ALL.iter().any(|s| self.is_enabled(*s))
    }
}
