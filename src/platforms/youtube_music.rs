use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{EmbedCapability, Platform};
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://music\.youtube\.com/channel/(?P<uid>UC[\w-]{22})$",
        r"^UC[\w-]{22}$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://music\.youtube\.com/watch\?(?:[^#]*&)?v=(?P<id>[\w-]{11})(?:&[^#]*)?$",
    )
    .content(
        "playlist",
        "playlistId",
        r"(?i)^https?://music\.youtube\.com/playlist\?(?:[^#]*&)?list=(?P<id>[\w-]+)(?:&[^#]*)?$",
    )
    .content(
        "album",
        "albumId",
        r"(?i)^https?://music\.youtube\.com/browse/(?P<id>MPREb_[\w-]+)$",
    )
    .build()
    .expect("valid YouTube Music patterns")
});

/// YouTube Music. Registered ahead of [`super::youtube::YouTube`], which
/// also accepts `music.youtube.com` watch links.
pub struct YouTubeMusic;

impl YouTubeMusic {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for YouTubeMusic {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for YouTubeMusic {
    fn id(&self) -> &'static str {
        "youtube_music"
    }

    fn name(&self) -> &'static str {
        "YouTube Music"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["music.youtube.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://music.youtube.com/channel/{username}")
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "video" => Some(format!("https://music.youtube.com/watch?v={id}")),
            "playlist" => Some(format!("https://music.youtube.com/playlist?list={id}")),
            "album" => Some(format!("https://music.youtube.com/browse/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url)
            .unwrap_or_else(|| normalize::normalize(&normalize::strip_params(url, &["si"])))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }
}

impl EmbedCapability for YouTubeMusic {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "video").then(|| format!("https://www.youtube.com/embed/{id}"))
    }
}
