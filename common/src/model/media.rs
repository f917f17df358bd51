use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Response of `POST /upload/` and `POST /fetch-media/`: a path relative to
/// the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLocation {
    pub url: String,
}

/// Body of `POST /fetch-media/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchMediaRequest {
    pub url: String,
}

static IMAGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpeg|jpg|gif|png|webp)$").expect("static regex"));
static VIDEO_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(mp4|webm)$").expect("static regex"));

/// How a URL attached to an entity or attribute should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// No URL at all.
    None,
    Image,
    Video,
    /// Anything else; rendered as an outbound link.
    Link,
}

impl MediaKind {
    /// Classifies by file suffix. Matching is case-sensitive, like the
    /// backend's stored file names.
    pub fn classify(url: &str) -> MediaKind {
        if url.is_empty() {
            MediaKind::None
        } else if IMAGE_SUFFIX.is_match(url) {
            MediaKind::Image
        } else if VIDEO_SUFFIX.is_match(url) {
            MediaKind::Video
        } else {
            MediaKind::Link
        }
    }

    pub fn is_image(url: &str) -> bool {
        MediaKind::classify(url) == MediaKind::Image
    }
}

/// Joins the backend base URL and a relative media path.
pub fn absolute_media_url(base_url: &str, relative: &str) -> String {
    format!("{}{}", base_url, relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(MediaKind::classify(""), MediaKind::None);
        assert_eq!(MediaKind::classify("http://h/media/a.png"), MediaKind::Image);
        assert_eq!(MediaKind::classify("http://h/media/a.webp"), MediaKind::Image);
        assert_eq!(MediaKind::classify("http://h/media/a.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::classify("https://example.com/about"), MediaKind::Link);
        assert_eq!(MediaKind::classify("http://h/a.png?size=2"), MediaKind::Link);
        assert_eq!(MediaKind::classify("http://h/A.PNG"), MediaKind::Link);
    }

    #[test]
    fn media_url_is_plain_concatenation() {
        assert_eq!(
            absolute_media_url("http://localhost:8000", "/media/x.jpg"),
            "http://localhost:8000/media/x.jpg"
        );
    }
}
