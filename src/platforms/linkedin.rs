use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::Platform;
use crate::normalize;

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?linkedin\.com/in/(?P<user>[\w\-%]{3,100})$",
        r"^[\w-]{3,100}$",
    )
    .content(
        "company",
        "companyId",
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?linkedin\.com/company/(?P<id>[\w\-%]+)$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.|[a-z]{2}\.)?linkedin\.com/posts/(?P<user>[\w\-%]+?)_[^/?#]*activity-(?P<id>\d+)[^/?#]*$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.)?linkedin\.com/feed/update/urn:li:(?:activity|share|ugcPost):(?P<id>\d+)$",
    )
    .build()
    .expect("valid LinkedIn patterns")
});

pub struct LinkedIn;

impl LinkedIn {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for LinkedIn {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for LinkedIn {
    fn id(&self) -> &'static str {
        "linkedin"
    }

    fn name(&self) -> &'static str {
        "LinkedIn"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["linkedin.com"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://www.linkedin.com/in/{username}")
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "company" => Some(format!("https://www.linkedin.com/company/{id}")),
            "post" => Some(format!(
                "https://www.linkedin.com/feed/update/urn:li:activity:{id}"
            )),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        self.rebuild_url(url)
            .unwrap_or_else(|| normalize::normalize(url))
    }
}
