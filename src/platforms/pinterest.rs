use std::sync::LazyLock;

use super::patterns::{PatternSet, SHORT_LINK};
use super::traits::{EmbedCapability, Platform, ShortLinkCapability};
use crate::normalize;

const RESERVED: &[&str] = &[
    "business",
    "explore",
    "ideas",
    "login",
    "pin",
    "search",
    "settings",
    "today",
];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?pinterest\.(?:com|[a-z]{2}(?:\.[a-z]{2})?)/(?P<user>[\w-]{3,30})$",
        r"^@?\w{3,30}$",
    )
    .content(
        "pin",
        "pinId",
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?pinterest\.(?:com|[a-z]{2}(?:\.[a-z]{2})?)/pin/(?:[\w-]+--)?(?P<id>\d+)$",
    )
    .content(
        SHORT_LINK,
        "shortId",
        r"(?i)^https?://pin\.it/(?P<id>\w+)$",
    )
    .content(
        "board",
        "boardId",
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?pinterest\.(?:com|[a-z]{2}(?:\.[a-z]{2})?)/(?P<id>(?P<user>[\w-]{3,30})/[\w-]+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Pinterest patterns")
});

/// Pinterest, on `pinterest.com` and its country domains.
pub struct Pinterest;

impl Pinterest {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Pinterest {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Pinterest {
    fn id(&self) -> &'static str {
        "pinterest"
    }

    fn name(&self) -> &'static str {
        "Pinterest"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["pinterest.", "pin.it"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!(
            "https://www.pinterest.com/{}",
            username.trim_start_matches('@')
        )
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "pin" => Some(format!("https://www.pinterest.com/pin/{id}")),
            "board" => Some(format!("https://www.pinterest.com/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url)
            .unwrap_or_else(|| normalize::normalize(url))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl EmbedCapability for Pinterest {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "pin")
            .then(|| format!("https://assets.pinterest.com/ext/embed.html?id={id}"))
    }
}

impl ShortLinkCapability for Pinterest {}
