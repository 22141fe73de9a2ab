//! Video metadata sent with an upload.

use serde::Serialize;
use std::path::Path;

/// YouTube category "People & Blogs".
pub const PEOPLE_AND_BLOGS_CATEGORY: &str = "22";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Unlisted,
    Private,
}

/// Title, description and flags for one uploaded clip.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub privacy: PrivacyStatus,
    pub made_for_kids: bool,
}

impl VideoMetadata {
    /// Metadata for a rendered short: `"<stem> - Shorts"`, or `fallback_title`
    /// when the file has no usable stem.
    pub fn for_short(
        file: &Path,
        fallback_title: &str,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let title = match file.file_stem().and_then(|s| s.to_str()).map(str::trim) {
            Some(stem) if !stem.is_empty() => format!("{} - Shorts", stem),
            _ => fallback_title.to_string(),
        };

        Self {
            title,
            description: description.into(),
            tags,
            category_id: PEOPLE_AND_BLOGS_CATEGORY.to_string(),
            privacy: PrivacyStatus::Public,
            made_for_kids: false,
        }
    }

    /// `videos.insert` resource body with the `snippet` and `status` parts.
    pub fn to_resource(&self) -> serde_json::Value {
        serde_json::json!({
            "snippet": {
                "title": self.title,
                "description": self.description,
                "tags": self.tags,
                "categoryId": self.category_id,
            },
            "status": {
                "privacyStatus": self.privacy,
                "selfDeclaredMadeForKids": self.made_for_kids,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_stem() {
        let meta = VideoMetadata::for_short(
            Path::new("final/Dicas_de_Rust_shorts.mp4"),
            "Vídeo Automático",
            "desc",
            vec!["shorts".to_string()],
        );
        assert_eq!(meta.title, "Dicas_de_Rust_shorts - Shorts");

        let fallback = VideoMetadata::for_short(Path::new(""), "Vídeo Automático", "", Vec::new());
        assert_eq!(fallback.title, "Vídeo Automático");
    }

    #[test]
    fn test_resource_body() {
        let meta = VideoMetadata::for_short(Path::new("a.mp4"), "x", "d", vec!["t".to_string()]);
        let body = meta.to_resource();
        assert_eq!(body["snippet"]["categoryId"], "22");
        assert_eq!(body["snippet"]["tags"][0], "t");
        assert_eq!(body["status"]["privacyStatus"], "public");
        assert_eq!(body["status"]["selfDeclaredMadeForKids"], false);
    }
}
