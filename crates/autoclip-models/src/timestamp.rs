//! SRT timestamp formatting and parsing.
//!
//! Caption files use the `HH:MM:SS,mmm` layout: two-digit hours, minutes and
//! seconds, three-digit milliseconds, all zero-padded.

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Negative and non-finite inputs clamp to zero. The value is rounded to the
/// nearest millisecond before splitting so float noise never yields `,249`
/// for a quarter second.
///
/// # Examples
/// ```
/// use autoclip_models::timestamp::format_srt_time;
/// assert_eq!(format_srt_time(3661.25), "01:01:01,250");
/// assert_eq!(format_srt_time(0.0), "00:00:00,000");
/// ```
pub fn format_srt_time(seconds: f64) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds.
pub fn parse_srt_time(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (clock, millis) = ts
        .split_once(',')
        .ok_or_else(|| TimestampError::InvalidFormat(ts.to_string()))?;

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(TimestampError::InvalidFormat(ts.to_string()));
    }

    let hours: u64 = parts[0]
        .parse()
        .map_err(|_| TimestampError::InvalidValue("hours", parts[0].to_string()))?;
    let minutes: u64 = parts[1]
        .parse()
        .map_err(|_| TimestampError::InvalidValue("minutes", parts[1].to_string()))?;
    let seconds: u64 = parts[2]
        .parse()
        .map_err(|_| TimestampError::InvalidValue("seconds", parts[2].to_string()))?;
    let millis: u64 = millis
        .parse()
        .map_err(|_| TimestampError::InvalidValue("milliseconds", millis.to_string()))?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(TimestampError::InvalidFormat(ts.to_string()));
    }

    Ok((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampError {
    /// Timestamp string is empty
    Empty,
    /// Invalid numeric value for a component
    InvalidValue(&'static str, String),
    /// Invalid timestamp layout
    InvalidFormat(String),
}

impl std::fmt::Display for TimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Timestamp cannot be empty"),
            Self::InvalidValue(component, value) => {
                write!(f, "Invalid {} value: {}", component, value)
            }
            Self::InvalidFormat(ts) => {
                write!(f, "Invalid timestamp format '{}'. Use HH:MM:SS,mmm", ts)
            }
        }
    }
}

impl std::error::Error for TimestampError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_srt_time() {
        assert_eq!(format_srt_time(3661.25), "01:01:01,250");
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(59.999), "00:00:59,999");
        assert_eq!(format_srt_time(0.3), "00:00:00,300");
        assert_eq!(format_srt_time(36_000.0), "10:00:00,000");
    }

    #[test]
    fn test_format_srt_time_clamps_invalid_input() {
        assert_eq!(format_srt_time(-4.0), "00:00:00,000");
        assert_eq!(format_srt_time(f64::NAN), "00:00:00,000");
    }

    #[test]
    fn test_parse_srt_time() {
        assert!((parse_srt_time("01:01:01,250").unwrap() - 3661.25).abs() < 1e-9);
        assert!((parse_srt_time(" 00:00:02,500 ").unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_srt_time_errors() {
        assert_eq!(parse_srt_time(""), Err(TimestampError::Empty));
        assert!(matches!(
            parse_srt_time("00:00:02.500"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_srt_time("00:xx:02,500"),
            Err(TimestampError::InvalidValue("minutes", _))
        ));
        assert!(matches!(
            parse_srt_time("00:61:02,500"),
            Err(TimestampError::InvalidFormat(_))
        ));
    }
}
