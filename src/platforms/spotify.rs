use std::sync::LazyLock;

use super::patterns::{PatternSet, SHORT_LINK};
use super::traits::{EmbedCapability, Platform, ShortLinkCapability};
use crate::normalize;

/// Content types with their id keys, in match order.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("track", "trackId"),
    ("album", "albumId"),
    ("playlist", "playlistId"),
    ("artist", "artistId"),
    ("episode", "episodeId"),
    ("show", "showId"),
];

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    let mut builder = PatternSet::builder(
        r"(?i)^https?://open\.spotify\.com/(?:intl-[a-z]{2}(?:-[a-z]{2})?/)?user/(?P<user>[\w.\-]+)$",
        r"^[\w.\-]{1,64}$",
    );
    for &(content_type, id_key) in CONTENT_TYPES {
        builder = builder.content(
            content_type,
            id_key,
            format!(
                r"(?i)^https?://open\.spotify\.com/(?:intl-[a-z]{{2}}(?:-[a-z]{{2}})?/)?(?:embed/)?{content_type}/(?P<id>[A-Za-z0-9]{{22}})$"
            ),
        );
    }
    builder
        .content(
            SHORT_LINK,
            "shortId",
            r"(?i)^https?://spotify\.link/(?P<id>[A-Za-z0-9]+)$",
        )
        .build()
        .expect("valid Spotify patterns")
});

/// Spotify. Content lives on `open.spotify.com` only; the bare
/// `spotify.com` host is not accepted.
pub struct Spotify;

impl Spotify {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Spotify {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Spotify {
    fn id(&self) -> &'static str {
        "spotify"
    }

    fn name(&self) -> &'static str {
        "Spotify"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["open.spotify.com", "spotify.link"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://open.spotify.com/user/{username}")
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        is_content_type(content_type).then(|| format!("https://open.spotify.com/{content_type}/{id}"))
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url)
            .unwrap_or_else(|| normalize::normalize(&normalize::strip_params(url, &["si"])))
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        Some(self)
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl EmbedCapability for Spotify {
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String> {
        is_content_type(content_type)
            .then(|| format!("https://open.spotify.com/embed/{content_type}/{id}"))
    }
}

impl ShortLinkCapability for Spotify {}

fn is_content_type(content_type: &str) -> bool {
    CONTENT_TYPES.iter().any(|(t, _)| *t == content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = "https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh";

    #[test]
    fn test_detect() {
        let platform = Spotify::new();

        assert!(platform.detect(TRACK));
        assert!(platform.detect("https://open.spotify.com/intl-de/track/4iV5W9uYEdYUVa79Axb7Rh?si=abc"));
        assert!(platform.detect("https://open.spotify.com/embed/album/1DFixLWuPkv3KT3TnV35m3"));
        assert!(platform.detect("https://open.spotify.com/user/spotify"));
        assert!(platform.detect("https://spotify.link/AbCdEf123"));

        assert!(!platform.detect("https://spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh"));
        assert!(!platform.detect("https://open.spotify.com/track/tooshort"));
    }

    #[test]
    fn test_extract_track() {
        let extraction = Spotify::new().extract(TRACK).expect("track extracts");
        assert_eq!(extraction.ids["trackId"], "4iV5W9uYEdYUVa79Axb7Rh");
        assert_eq!(extraction.content_type(), Some("track"));
    }

    #[test]
    fn test_normalize_strips_locale_and_share_id() {
        assert_eq!(
            Spotify::new()
                .normalize_url("https://open.spotify.com/intl-de/track/4iV5W9uYEdYUVa79Axb7Rh?si=abc"),
            TRACK
        );
    }

    #[test]
    fn test_embed() {
        let platform = Spotify::new();

        let info = platform.embed_info(TRACK).expect("track embeds");
        assert_eq!(
            info.embed_url,
            "https://open.spotify.com/embed/track/4iV5W9uYEdYUVa79Axb7Rh"
        );
        assert!(!info.is_embed_url);

        let info = platform
            .embed_info("https://open.spotify.com/embed/track/4iV5W9uYEdYUVa79Axb7Rh")
            .expect("embed form embeds");
        assert!(info.is_embed_url);

        assert!(platform.embed_info("https://spotify.link/AbCdEf123").is_none());
        assert!(platform.embed_info("https://open.spotify.com/user/spotify").is_none());
    }

    #[test]
    fn test_is_short_url() {
        let platform = Spotify::new();
        assert!(platform.is_short_url("https://spotify.link/AbCdEf123"));
        assert!(!platform.is_short_url(TRACK));
    }
}
