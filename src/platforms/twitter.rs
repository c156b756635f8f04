use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{EmbedCapability, Platform};
use crate::normalize;

/// Top-level paths that are not accounts.
const RESERVED: &[&str] = &[
    "compose",
    "explore",
    "hashtag",
    "home",
    "i",
    "intent",
    "login",
    "logout",
    "messages",
    "notifications",
    "privacy",
    "search",
    "settings",
    "share",
    "signup",
    "tos",
];

/// Share parameters added by the apps.
const EXTRA_TRACKING: &[&str] = &["s", "t", "ref_src", "ref_url"];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/(?P<user>\w{1,15})$",
        r"^@?\w{1,15}$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/(?P<user>\w{1,15})/status(?:es)?/(?P<id>\d+)(?:/(?:photo|video)/\d)?$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/i/(?:web/)?status/(?P<id>\d+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Twitter patterns")
});

/// Twitter / X. Every host variant normalizes to `x.com`.
pub struct Twitter;

impl Twitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Twitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Twitter {
    fn id(&self) -> &'static str {
        "twitter"
    }

    fn name(&self) -> &'static str {
        "Twitter"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["twitter.com", "x.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://x.com/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "post").then(|| format!("https://x.com/i/status/{id}"))
    }

    fn normalize_url(&self, url: &str) -> String {
        let normalized = normalize::replace_host(
            url,
            &[
                "twitter.com",
                "www.twitter.com",
                "mobile.twitter.com",
                "www.x.com",
                "mobile.x.com",
            ],
            "x.com",
        );
        normalize::normalize(&normalize::strip_params(&normalized, EXTRA_TRACKING))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }
}

impl EmbedCapability for Twitter {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        (content_type == "post")
            .then(|| format!("https://platform.twitter.com/embed/Tweet.html?id={id}"))
    }

    // Embedded tweets live on platform.twitter.com, which this platform never matches.
    fn is_embed_url(&self, _text: &str) -> bool {
        false
    }
}
