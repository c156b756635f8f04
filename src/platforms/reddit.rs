use std::sync::LazyLock;

use url::Url;

use super::patterns::{PatternSet, SHORT_LINK};
use super::traits::{Platform, ShortLinkCapability};
use crate::normalize;

// The `subreddit` group lands in metadata.
static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^https?://(?:www\.|old\.|new\.|m\.)?reddit\.com/(?:u|user)/(?P<user>[\w-]{3,20})$",
        r"^[\w-]{3,20}$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://(?:www\.|old\.|new\.|m\.)?reddit\.com/r/(?P<subreddit>\w{2,21})/comments/(?P<id>[a-z0-9]+)(?:/[^/?#]*){0,2}$",
    )
    .content(
        "post",
        "postId",
        r"(?i)^https?://redd\.it/(?P<id>[a-z0-9]+)$",
    )
    .content(
        SHORT_LINK,
        "shortId",
        r"(?i)^https?://(?:www\.|m\.)?reddit\.com/r/(?P<subreddit>\w{2,21})/s/(?P<id>\w+)$",
    )
    .content(
        "subreddit",
        "subreddit",
        r"(?i)^https?://(?:www\.|old\.|new\.|m\.)?reddit\.com/r/(?P<id>\w{2,21})$",
    )
    .build()
    .expect("valid Reddit patterns")
});

/// Reddit. Share links (`/r/<sub>/s/<id>`) and `redd.it` links redirect to
/// the full comments URL.
pub struct Reddit;

impl Reddit {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for Reddit {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Reddit {
    fn id(&self) -> &'static str {
        "reddit"
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["reddit.com", "redd.it"]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("https://www.reddit.com/user/{username}")
    }

    fn build_content_url(&self, content_type: &str, id: &str) -> Option<String> {
        match content_type {
            "post" => Some(format!("https://redd.it/{id}")),
            "subreddit" => Some(format!("https://www.reddit.com/r/{id}")),
            _ => None,
        }
    }

    fn normalize_url(&self, url: &str) -> String {
        // Convert various reddit domains to www.reddit.com
        let normalized = normalize::replace_host(
            url,
            &["reddit.com", "old.reddit.com", "new.reddit.com", "m.reddit.com"],
            "www.reddit.com",
        );
        normalize::normalize(&normalized)
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        Some(self)
    }
}

impl ShortLinkCapability for Reddit {
    // `redd.it` links carry the post id but still redirect to the comments page.
    fn is_short_url(&self, text: &str) -> bool {
        PATTERNS
            .match_url(text)
            .is_some_and(|found| found.content_type == SHORT_LINK || is_redd_it(text))
    }
}

fn is_redd_it(text: &str) -> bool {
    Url::parse(text)
        .ok()
        .and_then(|url| url.host_str().map(|host| host == "redd.it"))
        .unwrap_or(false)
}
