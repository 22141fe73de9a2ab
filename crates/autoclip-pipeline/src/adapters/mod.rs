//! Production implementations of the stage traits.

pub mod acquire;
pub mod publish;
pub mod render;
pub mod transcribe;
pub mod translate;

pub use acquire::{validate_source_url, YtDlpAcquirer};
pub use publish::YouTubePublisher;
pub use render::FfmpegRenderer;
pub use transcribe::WhisperCli;
pub use translate::LibreTranslate;
