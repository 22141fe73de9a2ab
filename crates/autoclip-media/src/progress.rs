//! Render progress snapshots from FFmpeg's `-progress` stream.

use serde::{Deserialize, Serialize};

/// One closed `-progress` block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfmpegProgress {
    pub frame: u64,
    pub fps: f64,
    /// Output position in milliseconds
    pub out_time_ms: i64,
    /// Output position as reported (HH:MM:SS.micros)
    pub out_time: String,
    /// Encoding speed relative to realtime
    pub speed: f64,
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Share of a clip of `clip_secs` rendered so far, in `[0, 100]`.
    pub fn percent_of(&self, clip_secs: f64) -> f64 {
        if clip_secs <= 0.0 {
            return 0.0;
        }
        if self.is_complete {
            return 100.0;
        }
        let done = self.out_time_ms as f64 / 1000.0;
        (done / clip_secs * 100.0).clamp(0.0, 100.0)
    }

    /// Seconds of wall time left at the current speed.
    pub fn eta_secs(&self, clip_secs: f64) -> Option<f64> {
        if self.speed <= 0.0 || self.out_time_ms <= 0 {
            return None;
        }
        let remaining = clip_secs - self.out_time_ms as f64 / 1000.0;
        Some((remaining.max(0.0)) / self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_clip() {
        let progress = FfmpegProgress {
            out_time_ms: 15_000,
            ..Default::default()
        };
        assert!((progress.percent_of(60.0) - 25.0).abs() < 0.01);
        assert!((progress.percent_of(10.0) - 100.0).abs() < 0.01);
        assert_eq!(progress.percent_of(0.0), 0.0);

        let done = FfmpegProgress {
            is_complete: true,
            ..Default::default()
        };
        assert_eq!(done.percent_of(60.0), 100.0);
    }

    #[test]
    fn test_eta() {
        let progress = FfmpegProgress {
            out_time_ms: 30_000,
            speed: 3.0,
            ..Default::default()
        };
        assert!((progress.eta_secs(60.0).unwrap() - 10.0).abs() < 0.01);
        assert_eq!(progress.eta_secs(20.0), Some(0.0));
        assert!(FfmpegProgress::default().eta_secs(60.0).is_none());
    }
}
