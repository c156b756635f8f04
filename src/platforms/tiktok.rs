use std::sync::LazyLock;

use super::patterns::{PatternSet, SHORT_LINK};
use super::traits::{EmbedCapability, Platform, ShortLinkCapability};
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|m\.)?tiktok\.com/@(?P<user>[\w.]{2,24})$",
        r"^@?[\w.]{2,24}$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.)?tiktok\.com/@(?P<user>[\w.]{2,24})/video/(?P<id>\d+)$",
    )
    .content(
        "photo",
        "postId",
        r"(?i)^https?://(?:www\.|m\.)?tiktok\.com/@(?P<user>[\w.]{2,24})/photo/(?P<id>\d+)$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.)?tiktok\.com/embed(?:/v2)?/(?P<id>\d+)$",
    )
    .content(
        SHORT_LINK,
        "shortId",
        r"(?i)^https?://(?:vm|vt)\.tiktok\.com/(?P<id>[\w-]+)$",
    )
    .build()
    .expect("valid TikTok patterns")
});

pub struct TikTok;

impl TikTok {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TikTok {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for TikTok {
    fn id(&self) -> &'static str {
        "tiktok"
    }

    fn name(&self) -> &'static str {
        "TikTok"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["tiktok.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://www.tiktok.com/@{}", username.trim_start_matches('@'))
    }

    fn normalize_url(&self, url: &str) -> String {
        let normalized =
            normalize::replace_host(url, &["tiktok.com", "m.tiktok.com"], "www.tiktok.com");
        normalize::normalize(normalize::strip_query_and_fragment(&normalized))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl EmbedCapability for TikTok {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "video").then(|| format!("https://www.tiktok.com/embed/v2/{id}"))
    }
}

impl ShortLinkCapability for TikTok {}
