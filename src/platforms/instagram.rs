use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{EmbedCapability, Platform};
use crate::normalize;

const RESERVED: &[&str] = &[
    "about",
    "accounts",
    "challenge",
    "developer",
    "direct",
    "emails",
    "explore",
    "legal",
    "p",
    "reel",
    "reels",
    "stories",
    "tv",
    "web",
];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.)?(?:instagram\.com|instagr\.am)/(?P<user>[\w.]{1,30})$",
        r"^@?[\w.]{1,30}$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.)?(?:instagram\.com|instagr\.am)/(?:(?P<user>[\w.]{1,30})/)?p/(?P<id>[\w-]+)(?:/embed(?:/captioned)?)?$",
    )
    .content(
        "reel",
        "postId",
        r"(?i)^https?://(?:www\.)?(?:instagram\.com|instagr\.am)/reels?/(?P<id>[\w-]+)(?:/embed)?$",
    )
    .content(
        "tv",
        "postId",
        r"(?i)^https?://(?:www\.)?(?:instagram\.com|instagr\.am)/tv/(?P<id>[\w-]+)(?:/embed)?$",
    )
    .content(
        "story",
        "storyId",
        r"(?i)^https?://(?:www\.)?instagram\.com/stories/(?P<user>[\w.]{1,30})/(?P<id>\d+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Instagram patterns")
});

pub struct Instagram;

impl Instagram {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Instagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Instagram {
    fn id(&self) -> &'static str {
        "instagram"
    }

    fn name(&self) -> &'static str {
        "Instagram"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["instagram.com", "instagr.am"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://instagram.com/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "post" => Some(format!("https://instagram.com/p/{id}")),
            "reel" => Some(format!("https://instagram.com/reel/{id}")),
            "tv" => Some(format!("https://instagram.com/tv/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        if let Some(rebuilt) = self.rebuild_url(url) {
            return rebuilt;
        }

        // instagr.am and www. both collapse to instagram.com
        let normalized = normalize::replace_host(
            url,
            &["instagr.am", "www.instagram.com", "www.instagr.am"],
            "instagram.com",
        );
        normalize::strip_query_and_fragment(&normalized)
            .trim_end_matches('/')
            .to_string()
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }
}

impl EmbedCapability for Instagram {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        matches!(content_type, "post" | "reel" | "tv")
            .then(|| format!("https://www.instagram.com/p/{id}/embed"))
    }
}
