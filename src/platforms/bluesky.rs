use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{Extraction, Platform};
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://bsky\.(?:app|social)/profile/(?P<user>[\w.\-:]+)$",
        r"(?i)^(?:@?(?:[a-z0-9\-]+\.)+[a-z]{2,}|did:plc:[a-z0-9]+)$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://bsky\.(?:app|social)/profile/(?P<user>[\w.\-:]+)/post/(?P<id>[a-zA-Z0-9]+)$",
    )
    .build()
    .expect("valid Bluesky patterns")
});

/// Bluesky. Profiles are addressed by handle (`alice.bsky.social`) or by
/// DID (`did:plc:...`); a DID is reported as the user id.
pub struct Bluesky;

impl Bluesky {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Bluesky {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Bluesky {
    fn id(&self) -> &'static str {
        "bluesky"
    }

    fn name(&self) -> &'static str {
        "Bluesky"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["bsky.app", "bsky.social"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn extract(&self, text: &str) -> Option<Extraction> {
        let mut extraction = PATTERNS.extract(text)?;
        if extraction
            .username
            .as_deref()
            .is_some_and(|user| user.starts_with("did:"))
        {
            extraction.user_id = extraction.username.take();
        }
        Some(extraction)
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://bsky.app/profile/{}", username.trim_start_matches('@'))
    }

    // Normalize to bsky.app; post URLs need the author as well as the id.
    fn normalize_url(&self, url: &str) -> String {
        match PATTERNS.match_url(url) {
            Some(found) => match (found.user, found.id) {
                (Some(user), Some(id)) => format!("{}/post/{id}", self.build_profile_url(&user)),
                (Some(user), None) => self.build_profile_url(&user),
                _ => normalize::normalize(url),
            },
            None => normalize::normalize(&url.replace("bsky.social", "bsky.app")),
        }
    }
}
