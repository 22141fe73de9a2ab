//! Runs every source item through the enabled stages, strictly in sequence.
//!
//! A stage failure stops that item and is recorded; the run continues with
//! the next item. A missing prerequisite (file or manifest entry from an
//! earlier, skipped stage) turns the item into a skip instead of a failure.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use autoclip_captions::{extract_highlights, segment_cues, write_srt, KeywordMatcher};
use autoclip_models::{
    sanitize_base_name, ClipSpec, Cue, ItemStatus, Platform, SourceItem, Stage, StageFlags,
    Transcript,
};
use autoclip_publish::VideoMetadata;

use crate::adapters::validate_source_url;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::ItemLogger;
use crate::metrics;
use crate::stages::{Acquirer, ClipRenderer, Publisher, SpeechToText, Translator};
use crate::workspace::{ArtifactWorkspace, Manifest, ManifestEntry};

/// Terminal result for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Completed,
    /// `stage` is `None` when every stage was disabled.
    Skipped {
        stage: Option<Stage>,
        reason: String,
    },
    Failed {
        stage: Stage,
        reason: String,
    },
}

impl ItemOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ItemOutcome::Completed => "completed",
            ItemOutcome::Skipped { .. } => "skipped",
            ItemOutcome::Failed { .. } => "failed",
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ItemOutcome::Completed => None,
            ItemOutcome::Skipped { stage, .. } => *stage,
            ItemOutcome::Failed { stage, .. } => Some(*stage),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ItemOutcome::Completed => None,
            ItemOutcome::Skipped { reason, .. } | ItemOutcome::Failed { reason, .. } => Some(reason),
        }
    }
}

/// What happened to one item.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub url: String,
    pub base_name: Option<String>,
    pub status: ItemStatus,
    pub outcome: ItemOutcome,
    /// Clips rendered in this run
    pub clips: Vec<PathBuf>,
    /// Remote ids of published clips
    pub remote_ids: Vec<(Platform, String)>,
}

/// Per-item results of one run, in input order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub items: Vec<ItemReport>,
}

impl RunReport {
    fn count(&self, label: &str) -> usize {
        self.items.iter().filter(|i| i.outcome.label() == label).count()
    }

    pub fn completed(&self) -> usize {
        self.count("completed")
    }

    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }
}

/// The collaborators a run talks to.
#[derive(Clone)]
pub struct StageAdapters {
    pub acquirer: Arc<dyn Acquirer>,
    pub speech: Arc<dyn SpeechToText>,
    pub translator: Arc<dyn Translator>,
    pub renderer: Arc<dyn ClipRenderer>,
    /// Platforms without an entry are reported as manual uploads.
    pub publishers: HashMap<Platform, Arc<dyn Publisher>>,
}

/// Mutable state carried between the stages of one item.
#[derive(Debug, Default)]
struct ItemContext {
    base_name: Option<String>,
    source_file: Option<PathBuf>,
    transcript: Option<Transcript>,
    clips: Vec<PathBuf>,
    remote_ids: Vec<(Platform, String)>,
}

pub struct Orchestrator {
    config: Arc<PipelineConfig>,
    workspace: ArtifactWorkspace,
    matcher: KeywordMatcher,
    adapters: StageAdapters,
}

impl Orchestrator {
    pub fn new(config: Arc<PipelineConfig>, adapters: StageAdapters) -> PipelineResult<Self> {
        let matcher = KeywordMatcher::new(&config.highlight_keywords, config.highlight_match)?;
        let workspace = ArtifactWorkspace::from_config(&config);

        Ok(Self {
            config,
            workspace,
            matcher,
            adapters,
        })
    }

    pub fn workspace(&self) -> &ArtifactWorkspace {
        &self.workspace
    }

    /// Process every item with the enabled stages.
    ///
    /// Errors here are run-level (directories, unreadable manifest); item
    /// failures only show up in the report.
    pub async fn run(&self, items: Vec<SourceItem>, flags: StageFlags) -> PipelineResult<RunReport> {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, items = items.len(), ?flags, "Starting run");

        self.workspace.ensure_dirs().await?;
        let mut manifest = self.workspace.load_manifest().await?;

        let mut reports = Vec::with_capacity(items.len());
        for mut item in items {
            let logger = ItemLogger::new(&item.url);
            let span = logger.create_span();
            let report = self
                .process_item(&mut item, flags, &mut manifest, &logger)
                .instrument(span)
                .await;

            metrics::record_item_outcome(report.outcome.label());
            reports.push(report);
        }

        let report = RunReport {
            run_id,
            items: reports,
        };
        info!(
            run_id = %run_id,
            completed = report.completed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Run finished"
        );
        Ok(report)
    }

    async fn process_item(
        &self,
        item: &mut SourceItem,
        flags: StageFlags,
        manifest: &mut Manifest,
        logger: &ItemLogger,
    ) -> ItemReport {
        let mut ctx = ItemContext::default();
        let outcome = self.run_stages(item, flags, manifest, logger, &mut ctx).await;

        if ctx.base_name.is_none() {
            ctx.base_name = manifest.get(&item.url).map(|e| e.base_name.clone());
        }

        ItemReport {
            url: item.url.clone(),
            base_name: ctx.base_name,
            status: item.status,
            outcome,
            clips: ctx.clips,
            remote_ids: ctx.remote_ids,
        }
    }

    async fn run_stages(
        &self,
        item: &mut SourceItem,
        flags: StageFlags,
        manifest: &mut Manifest,
        logger: &ItemLogger,
        ctx: &mut ItemContext,
    ) -> ItemOutcome {
        if !flags.any_enabled() {
            logger.log_warning("every stage is disabled; nothing to do");
            return ItemOutcome::Skipped {
                stage: None,
                reason: "all stages disabled".to_string(),
            };
        }

        for &stage in Stage::ALL {
            if !flags.is_enabled(stage) {
                continue;
            }

            let stage_logger = logger.for_stage(stage);
            stage_logger.log_start(&item.url);

            let result = match stage {
                Stage::Acquire => self.acquire(&item.url, manifest, ctx, &stage_logger).await,
                Stage::Transcribe => self.transcribe(&item.url, manifest, ctx, &stage_logger).await,
                Stage::Caption => self.caption(&item.url, manifest, ctx, &stage_logger).await,
                Stage::Compose => self.compose(&item.url, manifest, ctx, &stage_logger).await,
                Stage::Publish => self.publish(&item.url, manifest, ctx, &stage_logger).await,
            };

            match result {
                Ok(()) => {
                    item.advance(stage);
                    stage_logger.log_completion(&item.status.to_string());
                }
                Err(e) if e.is_skip() => {
                    stage_logger.log_warning(&format!("skipping item: {}", e));
                    return ItemOutcome::Skipped {
                        stage: Some(stage),
                        reason: e.to_string(),
                    };
                }
                Err(e) => {
                    item.fail(stage);
                    stage_logger.log_error(&e.to_string());
                    metrics::record_stage_failure(stage);
                    return ItemOutcome::Failed {
                        stage,
                        reason: e.to_string(),
                    };
                }
            }
        }

        ItemOutcome::Completed
    }

    async fn acquire(
        &self,
        url: &str,
        manifest: &mut Manifest,
        ctx: &mut ItemContext,
        logger: &ItemLogger,
    ) -> PipelineResult<()> {
        validate_source_url(url)?;

        let media = self.adapters.acquirer.acquire(url, &self.workspace.input_dir).await?;

        let title = if media.title.trim().is_empty() {
            media
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            media.title.clone()
        };
        let base_name = manifest.unique_base_name(&sanitize_base_name(&title), url);

        manifest.upsert(ManifestEntry::new(url, &base_name, &media));
        self.workspace.save_manifest(manifest).await?;

        logger.log_progress(&format!(
            "acquired {} as {}",
            media.path.display(),
            base_name
        ));
        ctx.base_name = Some(base_name);
        ctx.source_file = Some(media.path);
        Ok(())
    }

    /// Base name from this run or from the manifest of an earlier one.
    fn resolve_base_name(
        &self,
        stage: Stage,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
    ) -> PipelineResult<String> {
        if let Some(base) = &ctx.base_name {
            return Ok(base.clone());
        }

        let entry = manifest
            .get(url)
            .ok_or_else(|| PipelineError::missing(stage, format!("no acquisition record for {}", url)))?;
        ctx.base_name = Some(entry.base_name.clone());
        ctx.source_file = Some(entry.source_file.clone());
        Ok(entry.base_name.clone())
    }

    /// Base name and an existing source file.
    fn resolve_source(
        &self,
        stage: Stage,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
    ) -> PipelineResult<(String, PathBuf)> {
        let base = self.resolve_base_name(stage, url, manifest, ctx)?;
        let source = match &ctx.source_file {
            Some(path) => path.clone(),
            None => manifest
                .get(url)
                .map(|e| e.source_file.clone())
                .ok_or_else(|| PipelineError::missing(stage, format!("no source file for {}", url)))?,
        };

        if !source.exists() {
            return Err(PipelineError::missing_file(stage, &source));
        }
        Ok((base, source))
    }

    /// Transcript from this run, else from disk.
    async fn resolve_transcript(
        &self,
        stage: Stage,
        base: &str,
        ctx: &ItemContext,
    ) -> PipelineResult<Transcript> {
        if let Some(transcript) = &ctx.transcript {
            return Ok(transcript.clone());
        }

        self.workspace
            .load_transcript(base)
            .await?
            .ok_or_else(|| PipelineError::missing_file(stage, &self.workspace.transcript_path(base)))
    }

    async fn transcribe(
        &self,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
        logger: &ItemLogger,
    ) -> PipelineResult<()> {
        let (base, source) = self.resolve_source(Stage::Transcribe, url, manifest, ctx)?;

        let transcript = self.adapters.speech.transcribe(&source).await?;
        let path = self.workspace.save_transcript(&base, &transcript).await?;

        logger.log_progress(&format!(
            "{} segments in '{}' saved to {}",
            transcript.segments.len(),
            transcript.language,
            path.display()
        ));
        ctx.transcript = Some(transcript);
        Ok(())
    }

    async fn caption(
        &self,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
        logger: &ItemLogger,
    ) -> PipelineResult<()> {
        let base = self.resolve_base_name(Stage::Caption, url, manifest, ctx)?;
        let transcript = self.resolve_transcript(Stage::Caption, &base, ctx).await?;

        let cues = segment_cues(&transcript);
        let cues = self.translate_cues(cues, &transcript.language, logger).await;

        let path = self.workspace.cue_path(&base);
        write_srt(&path, &cues).await?;

        logger.log_progress(&format!("{} cues written to {}", cues.len(), path.display()));
        ctx.transcript = Some(transcript);
        Ok(())
    }

    /// Translate cue text into the target language, keeping the original
    /// text of any cue whose translation fails.
    async fn translate_cues(&self, cues: Vec<Cue>, source_lang: &str, logger: &ItemLogger) -> Vec<Cue> {
        let target = self.config.language.as_str();
        if source_lang.trim().is_empty() || source_lang.eq_ignore_ascii_case(target) {
            return cues;
        }

        let mut fallbacks = 0usize;
        let mut translated = Vec::with_capacity(cues.len());
        for cue in cues {
            match self.adapters.translator.translate(&cue.text, source_lang, target).await {
                Ok(text) if !text.trim().is_empty() => translated.push(cue.with_text(text.trim())),
                Ok(_) => {
                    fallbacks += 1;
                    metrics::record_translation_fallback();
                    logger.log_warning(&format!("cue {} translated to empty text; keeping original", cue.index));
                    translated.push(cue);
                }
                Err(e) => {
                    fallbacks += 1;
                    metrics::record_translation_fallback();
                    logger.log_warning(&format!("cue {}: {}; keeping original", cue.index, e));
                    translated.push(cue);
                }
            }
        }

        logger.log_progress(&format!(
            "translated {} cues {} -> {} ({} kept original)",
            translated.len(),
            source_lang,
            target,
            fallbacks
        ));
        translated
    }

    async fn compose(
        &self,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
        logger: &ItemLogger,
    ) -> PipelineResult<()> {
        let (base, source) = self.resolve_source(Stage::Compose, url, manifest, ctx)?;
        let transcript = self.resolve_transcript(Stage::Compose, &base, ctx).await?;

        let highlights = extract_highlights(&transcript, &self.matcher);
        logger.log_progress(&format!("{} keyword highlights", highlights.len()));

        let cue_file = if self.config.burn_subtitles {
            let path = self.workspace.cue_path(&base);
            if path.exists() {
                Some(path)
            } else {
                logger.log_warning(&format!("{} not found; rendering without subtitles", path.display()));
                None
            }
        } else {
            None
        };

        for &platform in &self.config.platforms {
            let mut spec = ClipSpec::new(&source, &base, platform, highlights.clone());
            if let Some(cue_file) = &cue_file {
                spec = spec.with_cue_file(cue_file);
            }

            let output = self.workspace.clip_path(&base, platform);
            self.adapters.renderer.render(&spec, &output).await?;

            metrics::record_clip_rendered(platform.suffix());
            logger.log_progress(&format!("rendered {}", output.display()));
            ctx.clips.push(output);
        }

        ctx.transcript = Some(transcript);
        Ok(())
    }

    async fn publish(
        &self,
        url: &str,
        manifest: &Manifest,
        ctx: &mut ItemContext,
        logger: &ItemLogger,
    ) -> PipelineResult<()> {
        let base = self.resolve_base_name(Stage::Publish, url, manifest, ctx)?;

        let clips: Vec<(Platform, PathBuf)> = self
            .config
            .platforms
            .iter()
            .map(|&p| (p, self.workspace.clip_path(&base, p)))
            .collect();

        if let Some((_, missing)) = clips.iter().find(|(_, path)| !path.exists()) {
            return Err(PipelineError::missing_file(Stage::Publish, missing));
        }

        for (platform, clip) in clips {
            let Some(publisher) = self.adapters.publishers.get(&platform) else {
                logger.log_warning(&format!(
                    "no publisher for {}; manual upload required for {}",
                    platform,
                    clip.display()
                ));
                continue;
            };

            let metadata = VideoMetadata::for_short(
                &clip,
                &self.config.default_title,
                self.config.default_description.clone(),
                self.config.default_tags.clone(),
            );
            let remote_id = publisher.publish(&clip, &metadata).await?;

            metrics::record_upload(platform.suffix());
            logger.log_progress(&format!("published {} as {}", clip.display(), remote_id));
            ctx.remote_ids.push((platform, remote_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autoclip_models::{parse_source_list, AcquiredMedia, Segment};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Calls {
        acquire: AtomicUsize,
        transcribe: AtomicUsize,
        translate: AtomicUsize,
        render: AtomicUsize,
        publish: AtomicUsize,
    }

    struct FakeAcquirer(Arc<Calls>);

    #[async_trait]
    impl Acquirer for FakeAcquirer {
        async fn acquire(&self, url: &str, dir: &Path) -> PipelineResult<AcquiredMedia> {
            self.0.acquire.fetch_add(1, Ordering::SeqCst);
            if url.contains("broken") {
                return Err(PipelineError::acquisition("HTTP Error 404: Not Found"));
            }
            let id = url.rsplit('/').next().unwrap_or("x").to_string();
            let path = dir.join(format!("{}.mp4", id));
            tokio::fs::write(&path, b"video").await?;
            Ok(AcquiredMedia {
                path,
                title: format!("Talk {}", id),
                duration_secs: 300.0,
            })
        }
    }

    struct FakeSpeech(Arc<Calls>);

    #[async_trait]
    impl SpeechToText for FakeSpeech {
        async fn transcribe(&self, _file: &Path) -> PipelineResult<Transcript> {
            self.0.transcribe.fetch_add(1, Ordering::SeqCst);
            Ok(Transcript::new(
                "en",
                vec![
                    Segment::new(0.0, 3.0, "Welcome back."),
                    Segment::new(3.0, 7.0, "Here is an important tip."),
                ],
            ))
        }
    }

    struct FakeTranslator {
        calls: Arc<Calls>,
        fail: bool,
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(&self, text: &str, _source: &str, _target: &str) -> PipelineResult<String> {
            self.calls.translate.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(PipelineError::translation("service unavailable"))
            } else {
                Ok(format!("[pt] {}", text))
            }
        }
    }

    struct FakeRenderer {
        calls: Arc<Calls>,
        specs: Mutex<Vec<ClipSpec>>,
    }

    #[async_trait]
    impl ClipRenderer for FakeRenderer {
        async fn render(&self, spec: &ClipSpec, output: &Path) -> PipelineResult<()> {
            self.calls.render.fetch_add(1, Ordering::SeqCst);
            self.specs.lock().unwrap().push(spec.clone());
            tokio::fs::write(output, b"clip").await?;
            Ok(())
        }
    }

    struct FakePublisher(Arc<Calls>);

    #[async_trait]
    impl Publisher for FakePublisher {
        async fn publish(&self, file: &Path, metadata: &VideoMetadata) -> PipelineResult<String> {
            self.0.publish.fetch_add(1, Ordering::SeqCst);
            assert!(metadata.title.ends_with(" - Shorts"));
            Ok(format!("yt-{}", file.file_stem().unwrap().to_string_lossy()))
        }
    }

    struct Harness {
        _dir: tempfile::TempDir,
        calls: Arc<Calls>,
        renderer: Arc<FakeRenderer>,
        orchestrator: Orchestrator,
    }

    fn harness(fail_translation: bool, burn_subtitles: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            input_dir: dir.path().join("originals"),
            transcript_dir: dir.path().join("transcripts"),
            final_dir: dir.path().join("final"),
            burn_subtitles,
            ..PipelineConfig::default()
        };

        let calls = Arc::new(Calls::default());
        let renderer = Arc::new(FakeRenderer {
            calls: calls.clone(),
            specs: Mutex::new(Vec::new()),
        });
        let mut publishers: HashMap<Platform, Arc<dyn Publisher>> = HashMap::new();
        publishers.insert(Platform::Shorts, Arc::new(FakePublisher(calls.clone())));

        let adapters = StageAdapters {
            acquirer: Arc::new(FakeAcquirer(calls.clone())),
            speech: Arc::new(FakeSpeech(calls.clone())),
            translator: Arc::new(FakeTranslator {
                calls: calls.clone(),
                fail: fail_translation,
            }),
            renderer: renderer.clone(),
            publishers,
        };

        let orchestrator = Orchestrator::new(Arc::new(config), adapters).unwrap();
        Harness {
            _dir: dir,
            calls,
            renderer,
            orchestrator,
        }
    }

    fn items() -> Vec<SourceItem> {
        parse_source_list("https://youtu.be/broken\n\nhttps://youtu.be/aaa\n  https://youtu.be/bbb  \n")
    }

    #[tokio::test]
    async fn test_all_stages_disabled_skips_everything() {
        let h = harness(false, false);
        let report = h.orchestrator.run(items(), StageFlags::none()).await.unwrap();

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.skipped(), 3);
        for item in &report.items {
            assert_eq!(item.outcome.stage(), None);
            assert_eq!(item.status, ItemStatus::Pending);
        }
        assert_eq!(h.calls.acquire.load(Ordering::SeqCst), 0);
        assert_eq!(h.calls.transcribe.load(Ordering::SeqCst), 0);
        assert_eq!(h.calls.render.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_item_does_not_block_others() {
        let h = harness(false, false);
        let report = h.orchestrator.run(items(), StageFlags::all()).await.unwrap();

        let first = &report.items[0];
        assert!(matches!(first.outcome, ItemOutcome::Failed { stage: Stage::Acquire, .. }));
        assert_eq!(first.status, ItemStatus::Failed(Stage::Acquire));

        for item in &report.items[1..] {
            assert_eq!(item.outcome, ItemOutcome::Completed);
            assert_eq!(item.status, ItemStatus::Published);
            assert_eq!(item.clips.len(), 2);
            assert_eq!(item.remote_ids.len(), 1);
        }
        assert_eq!(report.items[1].base_name.as_deref(), Some("Talk_aaa"));
        assert_eq!(report.items[1].remote_ids[0].1, "yt-Talk_aaa_shorts");

        assert_eq!(h.calls.acquire.load(Ordering::SeqCst), 3);
        assert_eq!(h.calls.transcribe.load(Ordering::SeqCst), 2);
        assert_eq!(h.calls.render.load(Ordering::SeqCst), 4);
        assert_eq!(h.calls.publish.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_transcript_skips_caption() {
        let h = harness(false, false);
        let urls = || parse_source_list("https://youtu.be/aaa");

        h.orchestrator
            .run(urls(), StageFlags::none().with(Stage::Acquire, true))
            .await
            .unwrap();

        let report = h
            .orchestrator
            .run(urls(), StageFlags::none().with(Stage::Caption, true))
            .await
            .unwrap();

        assert!(matches!(
            report.items[0].outcome,
            ItemOutcome::Skipped { stage: Some(Stage::Caption), .. }
        ));
        assert_eq!(report.items[0].base_name.as_deref(), Some("Talk_aaa"));
    }

    #[tokio::test]
    async fn test_unacquired_item_skips_transcription() {
        let h = harness(false, false);
        let report = h
            .orchestrator
            .run(
                parse_source_list("https://youtu.be/never"),
                StageFlags::none().with(Stage::Transcribe, true),
            )
            .await
            .unwrap();

        assert!(matches!(
            report.items[0].outcome,
            ItemOutcome::Skipped { stage: Some(Stage::Transcribe), .. }
        ));
        assert_eq!(h.calls.transcribe.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translation_failure_keeps_original_text() {
        let h = harness(true, false);
        let flags = StageFlags::all().with(Stage::Compose, false).with(Stage::Publish, false);
        let report = h
            .orchestrator
            .run(parse_source_list("https://youtu.be/aaa"), flags)
            .await
            .unwrap();

        assert_eq!(report.items[0].outcome, ItemOutcome::Completed);
        assert_eq!(h.calls.translate.load(Ordering::SeqCst), 2);

        let srt = tokio::fs::read_to_string(h.orchestrator.workspace().cue_path("Talk_aaa"))
            .await
            .unwrap();
        assert!(srt.contains("Welcome back."));
        assert!(srt.contains("Here is an important tip."));
        assert!(!srt.contains("[pt]"));
    }

    #[tokio::test]
    async fn test_translated_cues_are_written() {
        let h = harness(false, false);
        let flags = StageFlags::all().with(Stage::Compose, false).with(Stage::Publish, false);
        h.orchestrator
            .run(parse_source_list("https://youtu.be/aaa"), flags)
            .await
            .unwrap();

        let srt = tokio::fs::read_to_string(h.orchestrator.workspace().cue_path("Talk_aaa"))
            .await
            .unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:03,000\n[pt] Welcome back.\n\n"));
    }

    #[tokio::test]
    async fn test_invalid_url_fails_acquisition() {
        let h = harness(false, false);
        let report = h
            .orchestrator
            .run(parse_source_list("not-a-url"), StageFlags::all())
            .await
            .unwrap();

        assert!(matches!(report.items[0].outcome, ItemOutcome::Failed { stage: Stage::Acquire, .. }));
        assert_eq!(h.calls.acquire.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_compose_passes_highlights_and_cue_file() {
        let h = harness(false, true);
        let flags = StageFlags::all().with(Stage::Publish, false);
        h.orchestrator
            .run(parse_source_list("https://youtu.be/aaa"), flags)
            .await
            .unwrap();

        let specs = h.renderer.specs.lock().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].platform, Platform::Shorts);
        assert_eq!(specs[1].platform, Platform::Tiktok);
        assert_eq!(specs[0].highlights.len(), 1);
        assert_eq!(specs[0].highlights[0].matched_keyword, "important");
        assert_eq!(
            specs[0].cue_file.as_deref(),
            Some(h.orchestrator.workspace().cue_path("Talk_aaa").as_path())
        );
    }

    #[tokio::test]
    async fn test_missing_clip_skips_publish() {
        let h = harness(false, false);
        let flags = StageFlags::none().with(Stage::Acquire, true).with(Stage::Publish, true);
        let report = h
            .orchestrator
            .run(parse_source_list("https://youtu.be/aaa"), flags)
            .await
            .unwrap();

        assert!(matches!(
            report.items[0].outcome,
            ItemOutcome::Skipped { stage: Some(Stage::Publish), .. }
        ));
        assert_eq!(report.items[0].status, ItemStatus::Acquired);
        assert_eq!(h.calls.publish.load(Ordering::SeqCst), 0);
    }
}
