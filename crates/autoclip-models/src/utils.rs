//! Filename helpers shared by every stage.
//!
//! All artifacts of one source item are keyed by the same sanitized base
//! name, so the rules here must stay stable across runs for resume to work.

use crate::platform::Platform;

/// Fallback base name when a title sanitizes to nothing.
pub const FALLBACK_BASE_NAME: &str = "video";

/// Turn a free-form title into a filesystem-safe base name.
///
/// Keeps alphanumeric characters (any script), spaces, `-` and `_`; trims;
/// then replaces spaces with underscores.
///
/// # Examples
/// ```
/// use autoclip_models::utils::sanitize_base_name;
/// assert_eq!(sanitize_base_name("Rust: Tips & Tricks!"), "Rust_Tips__Tricks");
/// ```
pub fn sanitize_base_name(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let safe = kept.trim().replace(' ', "_");
    if safe.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        safe
    }
}

/// Output filename for a rendered platform clip: `<base>_<suffix>.mp4`.
pub fn output_file_name(base_name: &str, platform: Platform) -> String {
    format!("{}_{}.mp4", base_name, platform.suffix())
}
