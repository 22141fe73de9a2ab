//! On-disk artifact layout and the acquisition manifest.
//!
//! Stages hand work to each other through these files, which is what lets a
//! later run skip earlier stages.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use autoclip_models::{output_file_name, AcquiredMedia, Platform, Transcript};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;

pub const MANIFEST_FILE: &str = "manifest.json";

/// What acquisition recorded about one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub url: String,
    pub base_name: String,
    pub source_file: PathBuf,
    pub title: String,
    pub duration_secs: f64,
    pub acquired_at: DateTime<Utc>,
}

impl ManifestEntry {
    pub fn new(url: impl Into<String>, base_name: impl Into<String>, media: &AcquiredMedia) -> Self {
        Self {
            url: url.into(),
            base_name: base_name.into(),
            source_file: media.path.clone(),
            title: media.title.clone(),
            duration_secs: media.duration_secs,
            acquired_at: Utc::now(),
        }
    }
}

/// URL → acquired file mapping, one entry per URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn get(&self, url: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.url == url)
    }

    /// Insert or replace the entry for `entry.url`.
    pub fn upsert(&mut self, entry: ManifestEntry) {
        match self.entries.iter_mut().find(|e| e.url == entry.url) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// `base` unless another URL already owns it, else `base_2`, `base_3`, ...
    pub fn unique_base_name(&self, base: &str, url: &str) -> String {
        let taken = |name: &str| self.entries.iter().any(|e| e.base_name == name && e.url != url);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

/// Directory layout shared by all stages.
#[derive(Debug, Clone)]
pub struct ArtifactWorkspace {
    pub input_dir: PathBuf,
    pub transcript_dir: PathBuf,
    pub final_dir: PathBuf,
}

impl ArtifactWorkspace {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        transcript_dir: impl Into<PathBuf>,
        final_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            transcript_dir: transcript_dir.into(),
            final_dir: final_dir.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.input_dir, &config.transcript_dir, &config.final_dir)
    }

    /// Create all three directories.
    pub async fn ensure_dirs(&self) -> PipelineResult<()> {
        for dir in [&self.input_dir, &self.transcript_dir, &self.final_dir] {
            tokio::fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.input_dir.join(MANIFEST_FILE)
    }

    pub fn transcript_path(&self, base_name: &str) -> PathBuf {
        self.transcript_dir.join(format!("{}.json", base_name))
    }

    pub fn cue_path(&self, base_name: &str) -> PathBuf {
        self.transcript_dir.join(format!("{}.srt", base_name))
    }

    pub fn clip_path(&self, base_name: &str, platform: Platform) -> PathBuf {
        self.final_dir.join(output_file_name(base_name, platform))
    }

    /// Load the manifest; a missing file is an empty manifest.
    pub async fn load_manifest(&self) -> PipelineResult<Manifest> {
        read_json_if_exists(&self.manifest_path())
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn save_manifest(&self, manifest: &Manifest) -> PipelineResult<()> {
        tokio::fs::create_dir_all(&self.input_dir).await?;
        let json = serde_json::to_string_pretty(manifest)?;
        tokio::fs::write(self.manifest_path(), json).await?;
        debug!(entries = manifest.entries.len(), "Saved manifest");
        Ok(())
    }

    pub async fn save_transcript(&self, base_name: &str, transcript: &Transcript) -> PipelineResult<PathBuf> {
        tokio::fs::create_dir_all(&self.transcript_dir).await?;
        let path = self.transcript_path(base_name);
        tokio::fs::write(&path, transcript.to_json_pretty()?).await?;
        Ok(path)
    }

    /// Load a saved transcript, or `None` if it was never written.
    pub async fn load_transcript(&self, base_name: &str) -> PipelineResult<Option<Transcript>> {
        read_json_if_exists(&self.transcript_path(base_name)).await
    }
}

async fn read_json_if_exists<T: serde::de::DeserializeOwned>(path: &Path) -> PipelineResult<Option<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
