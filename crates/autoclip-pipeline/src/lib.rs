//! Short-clip pipeline.
//!
//! This crate provides:
//! - Configuration from the environment
//! - Stage adapter traits and their production implementations
//! - The on-disk artifact workspace and acquisition manifest
//! - The orchestrator and its per-item run report
//! - Structured per-item logging and run counters

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod stages;
pub mod workspace;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::{init_tracing, ItemLogger};
pub use orchestrator::{ItemOutcome, ItemReport, Orchestrator, RunReport, StageAdapters};
pub use report::render_report;
pub use stages::{Acquirer, ClipRenderer, Publisher, SpeechToText, Translator};
pub use workspace::{ArtifactWorkspace, Manifest, ManifestEntry};
