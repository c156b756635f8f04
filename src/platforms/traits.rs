use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::patterns::{PatternSet, PROFILE, SHORT_LINK};
use crate::normalize;
use crate::resolver::ResolverOptions;
use crate::result::{content_id_for, EmbedData, EmbedKind};

/// Identity and content data extracted from a matched input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub username: Option<String>,
    /// Opaque platform user id (numeric ids, DIDs, ...).
    pub user_id: Option<String>,
    /// Content ids keyed like `videoId` or `postId`.
    pub ids: BTreeMap<String, String>,
    /// Content-type flags (`isVideo`), the `contentType` discriminator and extras.
    pub metadata: BTreeMap<String, Value>,
}

impl Extraction {
    /// Empty payload tagged with a content type.
    ///
    /// Sets `contentType` and the matching `is<Type>` flag, e.g. `isProfile`
    /// for `profile` or `isShortLink` for `shortLink`.
    #[must_use]
    pub fn for_content_type(content_type: &str) -> Self {
        let mut extraction = Self::default();
        extraction
            .metadata
            .insert("contentType".to_string(), Value::from(content_type));
        extraction
            .metadata
            .insert(content_flag(content_type), Value::Bool(true));
        extraction
    }

    /// Payload for a profile match.
    #[must_use]
    pub fn profile(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::for_content_type(PROFILE)
        }
    }

    #[must_use]
    pub fn with_id(mut self, key: &str, value: impl Into<String>) -> Self {
        self.ids.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// The `contentType` discriminator, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.metadata.get("contentType").and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_profile(&self) -> bool {
        self.metadata.get("isProfile") == Some(&Value::Bool(true))
    }
}

/// Metadata flag name for a content type: `video` -> `isVideo`.
#[must_use]
pub fn content_flag(content_type: &str) -> String {
    let mut chars = content_type.chars();
    chars.next().map_or_else(
        || "is".to_string(),
        |first| format!("is{}{}", first.to_ascii_uppercase(), chars.as_str()),
    )
}

/// Embed data produced by a platform for a matched input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedInfo {
    pub embed_url: String,
    pub kind: EmbedKind,
    /// The input was already an embed URL.
    pub is_embed_url: bool,
    pub options: BTreeMap<String, Value>,
}

impl EmbedInfo {
    #[must_use]
    pub fn new(embed_url: impl Into<String>) -> Self {
        Self {
            embed_url: embed_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn embedded(mut self, is_embed_url: bool) -> Self {
        self.is_embed_url = is_embed_url;
        self
    }

    #[must_use]
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Full embed descriptor for `platform`; empty options become `None`.
    #[must_use]
    pub fn into_embed_data(self, platform: &str, content_id: String) -> EmbedData {
        EmbedData {
            platform: platform.to_string(),
            kind: self.kind,
            content_id,
            embed_url: self.embed_url,
            options: (!self.options.is_empty()).then_some(self.options),
        }
    }
}

/// Descriptor of one recognizable external service.
///
/// `detect` and `extract` must agree: whenever `detect` accepts a string,
/// `extract` returns a payload for it. The default implementations both go
/// through [`PatternSet::match_url`], which keeps them consistent.
///
/// Optional capabilities are exposed through [`Platform::embed`],
/// [`Platform::short_links`] and [`Platform::timestamps`]; callers check for
/// presence before using them.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Stable identifier, e.g. `youtube`.
    fn id(&self) -> &'static str;

    /// Display name, e.g. `YouTube`.
    fn name(&self) -> &'static str;

    /// Domains used as a cheap pre-filter before pattern matching.
    ///
    /// An empty list skips the pre-filter.
    fn domains(&self) -> &'static [&'static str];

    /// Compiled, enhanced patterns.
    fn patterns(&self) -> &PatternSet;

    /// Check whether the already-prepared input belongs to this platform.
    fn detect(&self, text: &str) -> bool {
        self.matches_domain(text) && self.patterns().match_url(text).is_some()
    }

    /// Check the domain pre-filter (case-insensitive substring match).
    fn matches_domain(&self, text: &str) -> bool {
        let domains = self.domains();
        if domains.is_empty() {
            return true;
        }
        let lower = text.to_ascii_lowercase();
        domains.iter().any(|domain| lower.contains(domain))
    }

    /// Extract identity and content data.
    fn extract(&self, text: &str) -> Option<Extraction> {
        self.patterns().extract(text)
    }

    /// Validate a standalone handle (no URL around it).
    fn validate_handle(&self, handle: &str) -> bool {
        self.patterns().is_valid_handle(handle)
    }

    /// Canonical profile URL for a username.
    fn build_profile_url(&self, username: &str) -> String;

    /// Canonical URL for a piece of content, when the platform has one.
    fn build_content_url(&self, _content_type: &str, _id: &str) -> Option<String> {
        None
    }

    /// Platform-specific normalization.
    fn normalize_url(&self, url: &str) -> String {
        normalize::normalize(url)
    }

    /// Rebuild a canonical URL from the parts matched in `text`.
    ///
    /// Profiles go through [`Platform::build_profile_url`], content through
    /// [`Platform::build_content_url`].
    fn rebuild_url(&self, text: &str) -> Option<String> {
        let found = self.patterns().match_url(text)?;
        if found.is_profile() {
            found
                .user
                .as_deref()
                .map(|user| self.build_profile_url(user))
        } else {
            self.build_content_url(found.content_type, found.id.as_deref()?)
        }
    }

    fn embed(&self) -> Option<&dyn EmbedCapability> {
        None
    }

    fn short_links(&self) -> Option<&dyn ShortLinkCapability> {
        None
    }

    fn timestamps(&self) -> Option<&dyn TimestampCapability> {
        None
    }

    /// Embed descriptor that may follow a short link first.
    ///
    /// Inputs that are not short links get exactly the synchronous
    /// [`EmbedCapability::embed_data`] result.
    ///
    /// # Errors
    ///
    /// Returns an error if resolving a short link fails.
    async fn embed_info_async(
        &self,
        text: &str,
        options: &ResolverOptions,
    ) -> Result<Option<EmbedData>> {
        let Some(embed) = self.embed() else {
            return Ok(None);
        };

        match self.short_links() {
            Some(short) if short.is_short_url(text) => {
                let resolved = short.resolve_short_url(text, options).await?;
                Ok(embed.embed_data(&resolved))
            }
            _ => Ok(embed.embed_data(text)),
        }
    }
}

/// Platforms that can produce an embeddable form of their content.
pub trait EmbedCapability: Platform {
    /// Embed URL for a content id.
    fn generate_embed_url(&self, content_type: &str, id: &str) -> Option<String>;

    /// Check whether the input already is an embed URL.
    ///
    /// By default an input is an embed form when one of its path segments is
    /// exactly `embed`.
    fn is_embed_url(&self, text: &str) -> bool {
        normalize::has_path_segment(text, "embed")
    }

    /// Embed info for the prepared input.
    ///
    /// Short links have no embed info here; their content id is only known
    /// after resolution (see [`Platform::embed_info_async`]).
    fn embed_info(&self, text: &str) -> Option<EmbedInfo> {
        let found = self.patterns().match_url(text)?;
        let id = found.id.as_deref()?;
        let embed_url = self.generate_embed_url(found.content_type, id)?;
        Some(EmbedInfo::new(embed_url).embedded(self.is_embed_url(text)))
    }

    /// Embed descriptor for the prepared input, with the content id picked
    /// from the extracted ids.
    fn embed_data(&self, text: &str) -> Option<EmbedData> {
        let info = self.embed_info(text)?;
        let content_id = self
            .extract(text)
            .map(|extraction| content_id_for(&extraction.ids))
            .unwrap_or_default();
        Some(info.into_embed_data(self.id(), content_id))
    }
}

/// Platforms with redirect-based short links.
#[async_trait]
pub trait ShortLinkCapability: Platform {
    /// Check whether the input is a short link.
    ///
    /// By default only inputs matching the platform's `shortLink` content
    /// pattern are short links.
    fn is_short_url(&self, text: &str) -> bool {
        self.patterns()
            .match_url(text)
            .is_some_and(|found| found.content_type == SHORT_LINK)
    }

    /// Follow a short link until it stops redirecting or is no longer short.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver fails.
    async fn resolve_short_url(&self, short_url: &str, options: &ResolverOptions) -> Result<String> {
        let mut current = short_url.to_string();
        for hop in 0..options.max_hops() {
            let next = options
                .resolver()
                .resolve(&current)
                .await
                .with_context(|| format!("Failed to resolve short URL {current}"))?;
            debug!(platform = self.id(), hop, from = %current, to = %next, "Resolved short link hop");

            if next == current {
                break;
            }
            current = next;
            if !self.is_short_url(&current) {
                break;
            }
        }
        Ok(current)
    }
}

/// Platforms whose URLs can carry a start time.
pub trait TimestampCapability: Send + Sync {
    /// Start time in seconds.
    fn extract_timestamp(&self, text: &str) -> Option<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_flag() {
        assert_eq!(content_flag("video"), "isVideo");
        assert_eq!(content_flag("shortLink"), "isShortLink");
        assert_eq!(content_flag(""), "is");
    }

    #[test]
    fn test_profile_extraction() {
        let extraction = Extraction::profile("nasa");
        assert!(extraction.is_profile());
        assert_eq!(extraction.content_type(), Some("profile"));
        assert_eq!(extraction.username.as_deref(), Some("nasa"));
    }

    #[test]
    fn test_builders() {
        let extraction = Extraction::for_content_type("video")
            .with_id("videoId", "abc")
            .with_meta("timestamp", 42);
        assert_eq!(extraction.ids["videoId"], "abc");
        assert_eq!(extraction.metadata["timestamp"], Value::from(42));
        assert_eq!(extraction.metadata["isVideo"], Value::Bool(true));
        assert!(!extraction.is_profile());
    }

    #[test]
    fn test_embed_info_builder() {
        let info = EmbedInfo::new("https://example.com/embed/1")
            .embedded(true)
            .option("start", 30);
        assert_eq!(info.kind, EmbedKind::Iframe);
        assert!(info.is_embed_url);
        assert_eq!(info.options["start"], Value::from(30));
    }

    #[test]
    fn test_into_embed_data() {
        let data =
            EmbedInfo::new("https://example.com/embed/1").into_embed_data("example", "1".to_string());
        assert_eq!(data.platform, "example");
        assert_eq!(data.content_id, "1");
        assert_eq!(data.embed_url, "https://example.com/embed/1");
        assert!(data.options.is_none());

        let data = EmbedInfo::new("https://example.com/embed/1")
            .option("start", 30)
            .into_embed_data("example", String::new());
        assert_eq!(data.options.expect("options kept")["start"], Value::from(30));
    }
}
