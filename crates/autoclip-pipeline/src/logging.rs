//! Structured item logging and subscriber setup.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autoclip_models::Stage;

/// Logger bound to one source item and the stage it is in.
#[derive(Debug, Clone)]
pub struct ItemLogger {
    item: String,
    stage: Option<Stage>,
}

impl ItemLogger {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            stage: None,
        }
    }

    /// Same item, now in `stage`.
    pub fn for_stage(&self, stage: Stage) -> Self {
        Self {
            item: self.item.clone(),
            stage: Some(stage),
        }
    }

    fn stage_name(&self) -> &'static str {
        self.stage.map(|s| s.as_str()).unwrap_or("-")
    }

    pub fn log_start(&self, message: &str) {
        info!(item = %self.item, stage = self.stage_name(), "Stage started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(item = %self.item, stage = self.stage_name(), "{}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(item = %self.item, stage = self.stage_name(), "{}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(item = %self.item, stage = self.stage_name(), "Stage failed: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(item = %self.item, stage = self.stage_name(), "Stage completed: {}", message);
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Span covering all work on this item.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("item", item = %self.item)
    }
}

/// Install the global subscriber: ANSI text by default, JSON when `json`.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("autoclip=info,autoclip_pipeline=info,autoclip_media=info,autoclip_captions=info,autoclip_publish=info"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
