use std::sync::LazyLock;

use super::patterns::{PatternSet, PROFILE, SHORT_LINK};
use super::traits::{Platform, ShortLinkCapability};
use crate::normalize;

const RESERVED: &[&str] = &[
    "events",
    "gaming",
    "groups",
    "help",
    "login",
    "marketplace",
    "pages",
    "photo",
    "photos",
    "profile.php",
    "reel",
    "reels",
    "settings",
    "stories",
    "videos",
    "watch",
];

/// Share parameters added by the apps.
const EXTRA_TRACKING: &[&str] = &["mibextid", "rdid", "share_url", "sfnsn"];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|m\.|web\.)?(?:facebook|fb)\.com/(?P<user>[\w.]{5,50})$",
        r"^@?[\w.]{5,50}$",
    )
    .content(
        PROFILE,
        "",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/profile\.php\?(?:[^#]*&)?id=(?P<uid>\d+)(?:&[^#]*)?$",
    )
    .content(
        "reel",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/reel/(?P<id>\d+)$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/(?:(?P<user>[\w.]{5,50})/)?videos/(?:[\w.\-]+/)?(?P<id>\d+)$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/watch/?\?(?:[^#]*&)?v=(?P<id>\d+)(?:&[^#]*)?$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/(?P<user>[\w.]{5,50})/posts/(?P<id>\w+)$",
    )
    .content(
        "group",
        "groupId",
        r"(?i)^https?://(?:www\.|m\.|web\.)?facebook\.com/groups/(?P<id>[\w.]+)$",
    )
    .content(
        SHORT_LINK,
        "shortId",
        r"(?i)^https?://fb\.watch/(?P<id>[\w-]+)$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid Facebook patterns")
});

/// Facebook. Numeric `profile.php?id=` profiles carry a user id instead of
/// a username.
pub struct Facebook;

impl Facebook {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Facebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Facebook {
    fn id(&self) -> &'static str {
        "facebook"
    }

    fn name(&self) -> &'static str {
        "Facebook"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["facebook.com", "fb.com", "fb.watch"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://facebook.com/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "reel" => Some(format!("https://facebook.com/reel/{id}")),
            "video" => Some(format!("https://facebook.com/watch/?v={id}")),
            "group" => Some(format!("https://facebook.com/groups/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url).unwrap_or_else(|| {
            let normalized = normalize::replace_host(
                url,
                &["www.facebook.com", "m.facebook.com", "web.facebook.com"],
                "facebook.com",
            );
            normalize::normalize(&normalize::strip_params(&normalized, EXTRA_TRACKING))
        })
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl ShortLinkCapability for Facebook {}
