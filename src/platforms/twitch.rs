use std::sync::LazyLock;

use super::patterns::{PatternSet, PROFILE};
use super::traits::{EmbedCapability, EmbedInfo, Platform};
use crate::normalize;

const RESERVED: &[&str] = &[
    "directory",
    "downloads",
    "inventory",
    "jobs",
    "login",
    "prime",
    "search",
    "settings",
    "signup",
    "subscriptions",
    "turbo",
    "videos",
    "wallet",
];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|m\.)?twitch\.tv/(?P<user>\w{4,25})$",
        r"^@?\w{4,25}$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.)?twitch\.tv/videos/(?P<id>\d+)$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://player\.twitch\.tv/\?(?:[^#]*&)?video=v?(?P<id>\d+)(?:&[^#]*)?$",
    )
    .content(
        "clip",
        "clipId",
        r"(?i)^https?://clips\.twitch\.tv/(?:embed\?(?:[^#]*&)?clip=)?(?P<id>[\w-]+)(?:&[^#]*)?$",
    )
    .content(
        "clip",
        "clipId",
        r"(?i)^https?://(?:www\.|m\.)?twitch\.tv/(?P<user>\w{4,25})/clip/(?P<id>[\w-]+)$",
    )
    .content(
        PROFILE,
        "",
        r"(?i)^https?://player\.twitch\.tv/\?(?:[^#]*&)?channel=(?P<user>\w{4,25})(?:&[^#]*)?$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Twitch patterns")
});

/// Twitch. Embeds need a `parent` query parameter naming the host page,
/// reported through the `requiresParent` embed option.
pub struct Twitch;

impl Twitch {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Twitch {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Twitch {
    fn id(&self) -> &'static str {
        "twitch"
    }

    fn name(&self) -> &'static str {
        "Twitch"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["twitch.tv"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://www.twitch.tv/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "video" => Some(format!("https://www.twitch.tv/videos/{id}")),
            "clip" => Some(format!("https://clips.twitch.tv/{id}")),
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
}

impl EmbedCapability for Twitch {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "video" => Some(format!("https://player.twitch.tv/?video=v{id}")),
            "clip" => Some(format!("https://clips.twitch.tv/embed?clip={id}")),
            _ => None,
        }
    }

    fn is_embed_url(&self, text: &str) -> bool {
        let lower = text.to_ascii_lowercase();
        lower.contains("://player.twitch.tv/") || lower.contains("clips.twitch.tv/embed")
    }

    // Channels embed live streams by name.
    fn embed_info(&self, text: &str) -> Option<EmbedInfo> {
        let found = PATTERNS.match_url(text)?;
        let embed_url = if found.is_profile() {
            format!("https://player.twitch.tv/?channel={}", found.user?)
        } else {
            self.generate_embed_url(found.content_type, found.id.as_deref()?)?
        };
        Some(
            EmbedInfo::new(embed_url)
                .embedded(self.is_embed_url(text))
                .option("requiresParent", true),
        )
    }
}
