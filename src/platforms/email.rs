use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{Extraction, Platform};

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^(?:mailto:)?(?P<user>[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,})$",
        r"(?i)^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$",
    )
    .build()
    .expect("valid email patterns")
});

/// Email addresses, bare or as `mailto:` links.
pub struct Email;

impl Email {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Email {
    fn id(&self) -> &'static str {
        "email"
    }

    fn name(&self) -> &'static str {
        "Email"
    }

    fn domains(&self) -> &'static [&'static str] {
        &[]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn extract(&self, text: &str) -> Option<Extraction> {
        let address = PATTERNS.match_url(text)?.user?.to_ascii_lowercase();
        Some(Extraction::profile(address).with_meta("isEmail", true))
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("mailto:{username}")
    }

    fn normalize_url(&self, url: &str) -> String {
        PATTERNS
            .match_url(url)
            .and_then(|found| found.user)
            .map_or_else(
                || url.to_string(),
                |address| format!("mailto:{}", address.to_ascii_lowercase()),
            )
    }
}
