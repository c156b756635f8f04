use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::Platform;
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.)?threads\.(?:net|com)/@(?P<user>[\w.]{1,30})$",
        r"^@?[\w.]{1,30}$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.)?threads\.(?:net|com)/@(?P<user>[\w.]{1,30})/post/(?P<id>[\w-]+)$",
    )
    .build()
    .expect("valid Threads patterns")
});

pub struct Threads;

impl Threads {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Threads {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Threads {
    fn id(&self) -> &'static str {
        "threads"
    }

    fn name(&self) -> &'static str {
        "Threads"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["threads.net", "threads.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://www.threads.net/@{}", username.trim_start_matches('@'))
    }

    // Post URLs need the author as well as the id.
    fn normalize_url(&self, url: &str) -> String {
        match PATTERNS.match_url(url) {
            Some(found) => match (found.user, found.id) {
                (Some(user), Some(id)) => format!("{}/post/{id}", self.build_profile_url(&user)),
                (Some(user), None) => self.build_profile_url(&user),
                _ => normalize::normalize(url),
            },
            None => normalize::normalize(url),
        }
    }
}
