//! FFmpeg filter graph construction for short clips.

use std::path::Path;

use crate::compose::CaptionOverlay;

/// Caption font size as a fraction of the output width.
const CAPTION_FONT_DIVISOR: u32 = 18;
const MIN_CAPTION_FONT: u32 = 16;
/// Rough glyph width relative to font size, used for line wrapping.
const GLYPH_WIDTH_RATIO: f64 = 0.55;

/// A crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl CropWindow {
    /// Full-height window of the given aspect ratio centered horizontally.
    ///
    /// Width is `floor(height * aspect)` rounded down to an even number and
    /// never wider than the source; height is rounded down to even as well.
    /// A window never exceeds the source, so a source under 2 px on either
    /// side keeps that side as is.
    pub fn centered(source_width: u32, source_height: u32, aspect_ratio: f64) -> Self {
        let height = even_floor(source_height).min(source_height);
        let target = (source_height as f64 * aspect_ratio).floor() as u32;
        let width = even_floor(target.min(source_width)).min(source_width);
        let x = source_width.saturating_sub(width) / 2;
        let y = source_height.saturating_sub(height) / 2;

        Self { width, height, x, y }
    }

    pub fn to_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

fn even_floor(value: u32) -> u32 {
    (value - value % 2).max(2)
}

/// Escape a value for use as a filter option inside a `-vf` argument.
///
/// Two levels: the option parser (quoted, with `'` spliced as `'\''`) and
/// the filter graph parser (backslash before `\ ' [ ] , ;`).
pub fn escape_filter_value(value: &str) -> String {
    let quoted = format!("'{}'", value.replace('\'', r"'\''"));

    let mut escaped = String::with_capacity(quoted.len() * 2);
    for c in quoted.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Caption font size for a clip of the given output width.
pub fn caption_font_size(output_width: u32) -> u32 {
    (output_width / CAPTION_FONT_DIVISOR).max(MIN_CAPTION_FONT)
}

/// Greedy word wrap so captions stay inside a narrow vertical frame.
pub fn wrap_caption(text: &str, output_width: u32) -> String {
    let font = caption_font_size(output_width) as f64;
    let max_chars = ((output_width as f64 * 0.9) / (font * GLYPH_WIDTH_RATIO)).floor() as usize;
    let max_chars = max_chars.max(8);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Bottom-center drawtext for one highlight caption.
fn drawtext_filter(overlay: &CaptionOverlay, output_width: u32) -> String {
    let font_size = caption_font_size(output_width);
    let text = wrap_caption(&overlay.text, output_width);
    let enable = format!("between(t,{:.3},{:.3})", overlay.start, overlay.end);

    format!(
        "drawtext=text={}:expansion=none:fontsize={}:fontcolor=white:borderw=4:bordercolor=black:\
         x=(w-text_w)/2:y=h-text_h-h/8:enable={}",
        escape_filter_value(&text),
        font_size,
        escape_filter_value(&enable),
    )
}

/// Full `-vf` chain: crop, optional burned cue track, then highlight captions.
pub fn build_compose_filter(
    crop: &CropWindow,
    overlays: &[CaptionOverlay],
    subtitles: Option<&Path>,
) -> String {
    let mut filters = vec![crop.to_filter()];

    if let Some(path) = subtitles {
        filters.push(format!(
            "subtitles=filename={}",
            escape_filter_value(&path.to_string_lossy())
        ));
    }

    filters.extend(overlays.iter().map(|o| drawtext_filter(o, crop.width)));
    filters.join(",")
}
