use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{EmbedCapability, Platform};
use crate::normalize;

const RESERVED: &[&str] = &[
    "about",
    "blog",
    "categories",
    "channels",
    "features",
    "groups",
    "help",
    "join",
    "log_in",
    "ondemand",
    "search",
    "settings",
    "upload",
    "watch",
];

// Unlisted videos carry a `hash` segment after the id; it lands in metadata.
static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.)?vimeo\.com/(?P<user>[a-z][\w-]{2,31})$",
        r"(?i)^@?[a-z][\w-]{2,31}$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.)?vimeo\.com/(?:channels/[\w-]+/|groups/[\w-]+/videos/)?(?P<id>\d+)(?:/(?P<hash>[\da-f]+))?$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://player\.vimeo\.com/video/(?P<id>\d+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Vimeo patterns")
});

pub struct Vimeo;

impl Vimeo {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Vimeo {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Vimeo {
    fn id(&self) -> &'static str {
        "vimeo"
    }

    fn name(&self) -> &'static str {
        "Vimeo"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["vimeo.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://vimeo.com/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "video").then(|| format!("https://vimeo.com/{id}"))
    }

    fn normalize_url(&self, url: &str) -> String {
        let normalized = normalize::replace_host(url, &["www.vimeo.com"], "vimeo.com");
        normalize::normalize(normalize::strip_query_and_fragment(&normalized))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }
}

impl EmbedCapability for Vimeo {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "video").then(|| format!("https://player.vimeo.com/video/{id}"))
    }

    fn is_embed_url(&self, text: &str) -> bool {
        text.to_ascii_lowercase().contains("://player.vimeo.com/")
    }
}
