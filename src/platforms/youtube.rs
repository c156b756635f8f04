use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::patterns::PatternSet;
use super::traits::{EmbedCapability, EmbedInfo, Extraction, Platform, TimestampCapability};
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|m\.)?youtube\.com/(?:@|c/|user/)(?P<user>[\w.\-]{3,30})$",
        r"^@?[\w.\-]{3,30}$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.|music\.)?youtube\.com/watch\?(?:[^#]*&)?v=(?P<id>[\w-]{11})(?:&[^#]*)?$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://youtu\.be/(?P<id>[\w-]{11})$",
    )
    .content(
        "video",
        "videoId",
        r"(?i)^https?://(?:www\.)?youtube(?:-nocookie)?\.com/embed/(?P<id>[\w-]{11})$",
    )
    .content(
        "short",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.)?youtube\.com/shorts/(?P<id>[\w-]{11})$",
    )
    .content(
        "live",
        "videoId",
        r"(?i)^https?://(?:www\.|m\.)?youtube\.com/live/(?P<id>[\w-]{11})$",
    )
    .content(
        "playlist",
        "playlistId",
        r"(?i)^https?://(?:www\.|m\.|music\.)?youtube\.com/playlist\?(?:[^#]*&)?list=(?P<id>[\w-]+)(?:&[^#]*)?$",
    )
    .content(
        "channel",
        "channelId",
        r"(?i)^https?://(?:www\.|m\.)?youtube\.com/channel/(?P<id>UC[\w-]{22})$",
    )
    .build()
    .expect("valid YouTube patterns")
});

/// `t=` / `start=` parameter in the query or fragment.
static TIMESTAMP_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&#](?:t|start)=([0-9hms]+)").expect("valid timestamp param regex")
});

static TIMESTAMP_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("valid duration regex")
});

/// Share parameters YouTube adds on top of the shared tracking list.
const EXTRA_TRACKING: &[&str] = &["si", "feature", "pp"];

pub struct YouTube;

impl YouTube {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for YouTube {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for YouTube {
    fn id(&self) -> &'static str {
        "youtube"
    }

    fn name(&self) -> &'static str {
        "YouTube"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["youtube.com", "youtu.be", "youtube-nocookie.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn extract(&self, text: &str) -> Option<Extraction> {
        let mut extraction = PATTERNS.extract(text)?;
        if let Some(seconds) = self.extract_timestamp(text) {
            extraction
                .metadata
                .insert("timestamp".to_string(), Value::from(seconds));
        }
        Some(extraction)
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!(
            "https://www.youtube.com/@{}",
            username.trim_start_matches('@')
        )
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "video" | "live" => Some(format!("https://www.youtube.com/watch?v={id}")),
            "short" => Some(format!("https://www.youtube.com/shorts/{id}")),
            "playlist" => Some(format!("https://www.youtube.com/playlist?list={id}")),
            "channel" => Some(format!("https://www.youtube.com/channel/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url).unwrap_or_else(|| {
            let url = normalize::replace_host(
                url,
                &["youtube.com", "m.youtube.com"],
                "www.youtube.com",
            );
            normalize::normalize(&normalize::strip_params(&url, EXTRA_TRACKING))
        })
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }

    fn timestamps(&self) -> Option<&dyn TimestampCapability> {
        Some(self)
    }
}

impl EmbedCapability for YouTube {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        matches!(content_type, "video" | "short" | "live")
            .then(|| format!("https://www.youtube.com/embed/{id}"))
    }

    fn embed_info(&self, text: &str) -> Option<EmbedInfo> {
        let found = PATTERNS.match_url(text)?;
        let embed_url = self.generate_embed_url(found.content_type, found.id.as_deref()?)?;
        let mut info = EmbedInfo::new(embed_url).embedded(self.is_embed_url(text));
        if let Some(start) = self.extract_timestamp(text) {
            info = info.option("start", start);
        }
        Some(info)
    }
}

impl TimestampCapability for YouTube {
    fn extract_timestamp(&self, text: &str) -> Option<u64> {
        let value = TIMESTAMP_PARAM.captures(text)?.get(1)?.as_str();
        parse_timestamp(value).filter(|seconds| *seconds > 0)
    }
}

/// Parse `90`, `90s`, `1m30s` or `1h2m3s` into seconds.
fn parse_timestamp(value: &str) -> Option<u64> {
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(seconds);
    }

    let caps = TIMESTAMP_PARTS.captures(value)?;
    let part = |i: usize, scale: u64| -> Option<u64> {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
            .and_then(|n| n.checked_mul(scale))
    };
    part(1, 3600)?
        .checked_add(part(2, 60)?)?
        .checked_add(part(3, 1)?)
}
