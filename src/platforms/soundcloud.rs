use std::sync::LazyLock;

use url::form_urlencoded;

use super::patterns::{PatternSet, SHORT_LINK};
use super::traits::{EmbedCapability, Platform, ShortLinkCapability};
use crate::normalize;

/// First path segments that are site pages rather than artists.
const RESERVED: &[&str] = &[
    "charts",
    "discover",
    "jobs",
    "messages",
    "mobile",
    "notifications",
    "pages",
    "people",
    "pro",
    "search",
    "settings",
    "stream",
    "tags",
    "upload",
    "you",
];

// Content ids keep the artist segment: `artist/track` and `artist/sets/name`.
static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|m\.)?soundcloud\.com/(?P<user>[\w-]+)$",
        r"^[\w-]{2,64}$",
    )
    .content(
        SHORT_LINK,
        "shortId",
        r"(?i)^https?://on\.soundcloud\.com/(?P<id>[\w-]+)$",
    )
    .content(
        "playlist",
        "playlistId",
        r"(?i)^https?://(?:www\.|m\.)?soundcloud\.com/(?P<id>(?P<user>[\w-]+)/sets/[\w-]+)$",
    )
    .content(
        "track",
        "trackId",
        r"(?i)^https?://(?:www\.|m\.)?soundcloud\.com/(?P<id>(?P<user>[\w-]+)/[\w-]+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid SoundCloud patterns")
});

pub struct SoundCloud;

impl SoundCloud {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SoundCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SoundCloud {
    fn id(&self) -> &'static str {
        "soundcloud"
    }

    fn name(&self) -> &'static str {
        "SoundCloud"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["soundcloud.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://soundcloud.com/{username}")
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        matches!(content_type, "track" | "playlist").then(|| format!("https://soundcloud.com/{id}"))
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url).unwrap_or_else(|| {
            let url = normalize::replace_host(
                url,
                &["www.soundcloud.com", "m.soundcloud.com"],
                "soundcloud.com",
            );
            normalize::normalize(normalize::strip_query_and_fragment(&url))
        })
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl EmbedCapability for SoundCloud {
    /// The widget player takes the percent-encoded track or playlist URL.
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        let target = self.build_content_url(content_type, id)?;
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        Some(format!("https://w.soundcloud.com/player/?url={encoded}"))
    }

    fn is_embed_url(&self, text: &str) -> bool {
        text.to_ascii_lowercase().contains("w.soundcloud.com/player")
    }
}

impl ShortLinkCapability for SoundCloud {}
