use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::Platform;
use crate::normalize;

/// Top-level paths that are site pages rather than users or orgs.
const RESERVED: &[&str] = &[
    "about",
    "apps",
    "collections",
    "contact",
    "enterprise",
    "explore",
    "features",
    "issues",
    "join",
    "login",
    "marketplace",
    "new",
    "notifications",
    "organizations",
    "orgs",
    "pricing",
    "pulls",
    "search",
    "security",
    "settings",
    "site",
    "sponsors",
    "topics",
    "trending",
];

// `repo` on issue and pull request matches lands in metadata.
static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.)?github\.com/(?P<user>[\w\-]{1,39})$",
        r"(?i)^@?[a-z0-9][a-z0-9\-]{0,38}$",
    )
    .content(
        "issue",
        "issueNumber",
        r"(?i)^https?://(?:www\.)?github\.com/(?P<repo>(?P<user>[\w\-]{1,39})/[\w.\-]+)/issues/(?P<id>\d+)$",
    )
    .content(
        "pullRequest",
        "pullNumber",
        r"(?i)^https?://(?:www\.)?github\.com/(?P<repo>(?P<user>[\w\-]{1,39})/[\w.\-]+)/pull/(?P<id>\d+)(?:/(?:files|commits))?$",
    )
    .content(
        "repo",
        "repoId",
        r"(?i)^https?://(?:www\.)?github\.com/(?P<id>(?P<user>[\w\-]{1,39})/[\w.\-]+?)(?:\.git)?$",
    )
    .content(
        "gist",
        "gistId",
        r"(?i)^https?://gist\.github\.com/(?:(?P<user>[\w\-]{1,39})/)?(?P<id>[0-9a-f]{7,})$",
    )
    .reserved(RESERVED)
    .build()
    .expect("valid GitHub patterns")
});

pub struct GitHub;

impl GitHub {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for GitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for GitHub {
    fn id(&self) -> &'static str {
        "github"
    }

    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["github.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://github.com/{}", username.trim_start_matches('@'))
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "repo" => Some(format!("https://github.com/{id}")),
            "gist" => Some(format!("https://gist.github.com/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url).unwrap_or_else(|| {
            let normalized = normalize::replace_host(url, &["www.github.com"], "github.com");
            normalize::normalize(normalize::strip_query_and_fragment(&normalized))
        })
    }
}
