//! Pipeline integration tests.
//!
//! External binaries (yt-dlp, whisper, ffmpeg) are replaced by fakes; the
//! HTTP collaborators run for real against mock servers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use autoclip_models::{
    parse_source_list, AcquiredMedia, ClipSpec, ItemStatus, Platform, Segment, Stage, StageFlags,
    Transcript, WordTiming,
};
use autoclip_pipeline::adapters::{LibreTranslate, YouTubePublisher};
use autoclip_pipeline::{
    Acquirer, ClipRenderer, ItemOutcome, Orchestrator, PipelineConfig, PipelineResult, Publisher,
    SpeechToText, StageAdapters,
};
use autoclip_publish::{CredentialStore, YouTubeUploader};

struct DiskAcquirer;

#[async_trait]
impl Acquirer for DiskAcquirer {
    async fn acquire(&self, url: &str, dir: &Path) -> PipelineResult<AcquiredMedia> {
        let id = url.rsplit('=').next().unwrap_or("video");
        let path = dir.join(format!("{}.mp4", id));
        tokio::fs::write(&path, b"source").await?;
        Ok(AcquiredMedia {
            path,
            title: "Rust: Tips & Tricks!".to_string(),
            duration_secs: 900.0,
        })
    }
}

struct ScriptedSpeech;

#[async_trait]
impl SpeechToText for ScriptedSpeech {
    async fn transcribe(&self, _file: &Path) -> PipelineResult<Transcript> {
        let words = vec![
            WordTiming::new("One", 0.0, 0.4),
            WordTiming::new("secret.", 0.4, 1.0),
            WordTiming::new("Two", 1.2, 1.6),
            WordTiming::new("more", 1.6, 2.0),
        ];
        Ok(Transcript::new(
            "en",
            vec![
                Segment::new(0.0, 2.5, "One secret. Two more").with_words(words),
                Segment::new(2.5, 5.0, "   "),
                Segment::new(5.0, 8.0, "Final words here"),
            ],
        ))
    }
}

struct TouchRenderer;

#[async_trait]
impl ClipRenderer for TouchRenderer {
    async fn render(&self, spec: &ClipSpec, output: &Path) -> PipelineResult<()> {
        assert!(spec.profile.max_duration_secs <= 60.0);
        tokio::fs::write(output, b"clip").await?;
        Ok(())
    }
}

fn config(root: &Path, platforms: Vec<Platform>, token: &Path, translate_url: String) -> PipelineConfig {
    PipelineConfig {
        input_dir: root.join("videos/originals"),
        transcript_dir: root.join("videos/transcripts"),
        final_dir: root.join("videos/final"),
        translate_url,
        platforms,
        youtube_token_path: token.to_path_buf(),
        ..PipelineConfig::default()
    }
}

async fn write_token(path: &Path, server: &MockServer) {
    let json = serde_json::json!({
        "token": "access",
        "refresh_token": "refresh",
        "client_id": "id",
        "client_secret": "secret",
        "token_uri": format!("{}/token", server.uri()),
        "expiry": (Utc::now() + Duration::hours(1)).to_rfc3339(),
    });
    tokio::fs::write(path, json.to_string()).await.unwrap();
}

fn adapters(config: &PipelineConfig, server: &MockServer) -> StageAdapters {
    let http = reqwest::Client::new();
    let uploader = YouTubeUploader::new(
        http.clone(),
        CredentialStore::new(&config.youtube_token_path, http.clone()),
    )
    .with_upload_url(format!("{}/upload", server.uri()));

    let mut publishers: HashMap<Platform, Arc<dyn Publisher>> = HashMap::new();
    publishers.insert(Platform::Shorts, Arc::new(YouTubePublisher::new(uploader)));

    StageAdapters {
        acquirer: Arc::new(DiskAcquirer),
        speech: Arc::new(ScriptedSpeech),
        translator: Arc::new(LibreTranslate::new(http, &config.translate_url, None)),
        renderer: Arc::new(TouchRenderer),
        publishers,
    }
}

async fn mount_services(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"translatedText": "traduzido"})))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Location", format!("{}/session/1", server.uri()).as_str()),
        )
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/session/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "yt-42"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resume_across_runs() {
    let server = MockServer::start().await;
    mount_services(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let token = dir.path().join("token.json");
    write_token(&token, &server).await;

    let config = Arc::new(config(
        dir.path(),
        vec![Platform::Shorts, Platform::Tiktok],
        &token,
        format!("{}/translate", server.uri()),
    ));
    let urls = || parse_source_list("https://www.youtube.com/watch?v=abc123\n");

    // First run: acquire and transcribe only
    let first = Orchestrator::new(config.clone(), adapters(&config, &server)).unwrap();
    let flags = StageFlags::none()
        .with(Stage::Acquire, true)
        .with(Stage::Transcribe, true);
    let report = assert_ok!(first.run(urls(), flags).await);
    assert_eq!(report.items[0].outcome, ItemOutcome::Completed);
    assert_eq!(report.items[0].status, ItemStatus::Transcribed);
    assert_eq!(report.items[0].base_name.as_deref(), Some("Rust_Tips__Tricks"));

    let ws = first.workspace();
    assert!(ws.manifest_path().exists());
    assert!(ws.transcript_path("Rust_Tips__Tricks").exists());
    assert!(!ws.cue_path("Rust_Tips__Tricks").exists());

    // Second run: everything after transcription, from disk
    let second = Orchestrator::new(config.clone(), adapters(&config, &server)).unwrap();
    let flags = StageFlags::all()
        .with(Stage::Acquire, false)
        .with(Stage::Transcribe, false);
    let report = assert_ok!(second.run(urls(), flags).await);

    let item = &report.items[0];
    assert_eq!(item.outcome, ItemOutcome::Completed);
    assert_eq!(item.status, ItemStatus::Published);
    assert_eq!(item.remote_ids, vec![(Platform::Shorts, "yt-42".to_string())]);

    let ws = second.workspace();
    assert!(ws.clip_path("Rust_Tips__Tricks", Platform::Shorts).exists());
    assert!(ws.clip_path("Rust_Tips__Tricks", Platform::Tiktok).exists());

    let srt = tokio::fs::read_to_string(ws.cue_path("Rust_Tips__Tricks")).await.unwrap();
    assert_eq!(
        srt,
        concat!(
            "1\n00:00:00,000 --> 00:00:01,000\ntraduzido\n\n",
            "2\n00:00:01,000 --> 00:00:02,500\ntraduzido\n\n",
            "3\n00:00:05,000 --> 00:00:08,000\ntraduzido\n\n",
        )
    );
}

#[tokio::test]
async fn test_tiktok_only_needs_manual_upload() {
    let server = MockServer::start().await;
    mount_services(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let token = dir.path().join("token.json");
    let config = Arc::new(config(
        dir.path(),
        vec![Platform::Tiktok],
        &token,
        format!("{}/translate", server.uri()),
    ));

    let orchestrator = Orchestrator::new(config.clone(), adapters(&config, &server)).unwrap();
    let report = assert_ok!(
        orchestrator
            .run(parse_source_list("https://www.youtube.com/watch?v=xyz"), StageFlags::all())
            .await
    );

    let item = &report.items[0];
    assert_eq!(item.outcome, ItemOutcome::Completed);
    assert!(item.remote_ids.is_empty());
    assert_eq!(item.clips.len(), 1);
    assert!(!token.exists());
}
