//! `autoclip` command line.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use autoclip_models::{parse_source_list, Platform, Stage, StageFlags};
use autoclip_pipeline::adapters::{FfmpegRenderer, LibreTranslate, WhisperCli, YouTubePublisher, YtDlpAcquirer};
use autoclip_pipeline::metrics::{init_metrics, write_snapshot};
use autoclip_pipeline::{init_tracing, render_report, Orchestrator, PipelineConfig, Publisher, StageAdapters};

/// Turn long videos into captioned vertical shorts.
#[derive(Debug, Parser)]
#[command(name = "autoclip", version, about)]
struct Cli {
    /// Newline-delimited list of source video URLs
    #[arg(long)]
    input: PathBuf,

    /// Reuse originals from an earlier run
    #[arg(long)]
    skip_download: bool,

    /// Reuse transcripts from an earlier run
    #[arg(long)]
    skip_transcribe: bool,

    /// Do not (re)write cue files
    #[arg(long)]
    skip_caption: bool,

    /// Do not render clips
    #[arg(long)]
    skip_edit: bool,

    /// Do not publish clips
    #[arg(long)]
    skip_upload: bool,
}

impl Cli {
    fn stage_flags(&self) -> StageFlags {
        StageFlags::all()
            .with(Stage::Acquire, !self.skip_download)
            .with(Stage::Transcribe, !self.skip_transcribe)
            .with(Stage::Caption, !self.skip_caption)
            .with(Stage::Compose, !self.skip_edit)
            .with(Stage::Publish, !self.skip_upload)
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        eprintln!("rustls crypto provider was already installed");
    }

    dotenvy::dotenv().ok();

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    init_tracing(use_json);

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("autoclip failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Arc::new(PipelineConfig::from_env().context("invalid configuration")?);
    let metrics_handle = init_metrics().context("failed to set up metrics")?;
    info!(
        input_dir = %config.input_dir.display(),
        transcript_dir = %config.transcript_dir.display(),
        final_dir = %config.final_dir.display(),
        language = %config.language,
        platforms = ?config.platforms,
        burn_subtitles = config.burn_subtitles,
        "Loaded configuration"
    );

    let list = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("cannot read input list {}", cli.input.display()))?;
    let items = parse_source_list(&list);
    if items.is_empty() {
        warn!(input = %cli.input.display(), "Input list has no URLs");
    }

    let flags = cli.stage_flags();
    let http = reqwest::Client::builder()
        .user_agent(concat!("autoclip/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let mut publishers: HashMap<Platform, Arc<dyn Publisher>> = HashMap::new();
    if flags.is_enabled(Stage::Publish) && config.platforms.contains(&Platform::Shorts) {
        publishers.insert(
            Platform::Shorts,
            Arc::new(YouTubePublisher::from_token_file(http.clone(), &config.youtube_token_path)),
        );
    }

    let speech = WhisperCli::new(&config.whisper_binary, &config.whisper_model);
    if flags.is_enabled(Stage::Transcribe) {
        speech.check_available().context("speech-to-text is unavailable")?;
    }

    let adapters = StageAdapters {
        acquirer: Arc::new(YtDlpAcquirer::new()),
        speech: Arc::new(speech),
        translator: Arc::new(LibreTranslate::new(
            http.clone(),
            &config.translate_url,
            config.translate_api_key.clone(),
        )),
        renderer: Arc::new(FfmpegRenderer::new(config.encoding.clone())),
        publishers,
    };

    let orchestrator = Orchestrator::new(config.clone(), adapters).context("failed to set up pipeline")?;
    let report = orchestrator.run(items, flags).await.context("pipeline run failed")?;

    println!("{}", render_report(&report));

    if let Some(path) = &config.metrics_path {
        if let Err(e) = write_snapshot(&metrics_handle, path).await {
            warn!(path = %path.display(), error = %e, "Failed to write metrics snapshot");
        }
    }
    Ok(())
}
