//! Parse orchestration: input preparation, dispatch, extraction merge,
//! normalization, canonical URL and embed data.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::normalize;
use crate::platforms::{Extraction, Platform, PlatformRegistry, PLATFORMS};
use crate::resolver::ResolverOptions;
use crate::result::ParseResult;

/// A bare `local@domain.tld` address.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^\s@/:]+@[^\s@/:]+\.[a-z]{2,}$").expect("valid email shape regex")
});

/// A host-looking `name.tld` somewhere in the input.
static DOMAIN_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[a-z0-9\-]+\.[a-z]{2,}").expect("valid domain regex"));

/// Trim the input and give scheme-less domains an `https://` scheme.
///
/// Email addresses and inputs that already carry a scheme (`mailto:`,
/// `tel:`, `http://`, ...) are only trimmed.
#[must_use]
pub fn prepare_input(input: &str) -> String {
    let trimmed = input.trim();
    if normalize::has_scheme(trimmed)
        || EMAIL_SHAPE.is_match(trimmed)
        || !DOMAIN_LIKE.is_match(trimmed)
    {
        return trimmed.to_string();
    }
    format!("https://{trimmed}")
}

/// Parses inputs against a platform registry.
///
/// The parser borrows the registry; it holds no state of its own, so one
/// parser can serve any number of threads.
#[derive(Clone, Copy)]
pub struct Parser<'a> {
    registry: &'a PlatformRegistry,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub const fn new(registry: &'a PlatformRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'a PlatformRegistry {
        self.registry
    }

    /// The platform the input dispatches to, if any.
    #[must_use]
    pub fn detect_platform(&self, input: &str) -> Option<&'a dyn Platform> {
        self.registry.detect(&prepare_input(input))
    }

    /// Parse one input. Never fails; unrecognized input gives an invalid result.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParseResult {
        let prepared = prepare_input(input);
        let mut result = ParseResult::unmatched(input, &prepared);

        let Some(platform) = self.registry.detect(&prepared) else {
            trace!(input, "No platform matched");
            return result;
        };

        let Some(extraction) = platform.extract(&prepared) else {
            warn!(
                platform = platform.id(),
                input, "Platform detected input but extracted nothing"
            );
            return result;
        };

        result.platform = Some(platform.id().to_string());
        result.platform_name = Some(platform.name().to_string());
        merge_extraction(&mut result, extraction);

        result.normalized_url = normalize_for(platform, &prepared);
        result.is_valid = true;

        if result.flag("isProfile") {
            if let Some(username) = result.username.as_deref() {
                result.canonical_url = Some(platform.build_profile_url(username));
            }
        }

        if let Some(embed) = platform.embed() {
            if let Some(info) = embed.embed_info(&prepared) {
                if info.is_embed_url {
                    result
                        .metadata
                        .insert("isEmbed".to_string(), Value::Bool(true));
                }
                let content_id = result.embed_content_id();
                result.embed_data = Some(info.into_embed_data(platform.id(), content_id));
            }
        }

        debug!(
            platform = platform.id(),
            content_type = result.content_type(),
            "Parsed input"
        );
        result
    }

    /// Parse, following the input first if it is a short link.
    ///
    /// Inputs that are not short links of the platform they dispatch to give
    /// exactly [`Parser::parse`]. For short links the resolved URL is parsed
    /// and `original_url` keeps the caller's input.
    ///
    /// # Errors
    ///
    /// Returns an error if resolving the short link fails.
    pub async fn parse_resolved(&self, input: &str, options: &ResolverOptions) -> Result<ParseResult> {
        let prepared = prepare_input(input);
        let short = self
            .registry
            .detect(&prepared)
            .and_then(|platform| platform.short_links())
            .filter(|short| short.is_short_url(&prepared));

        let Some(short) = short else {
            return Ok(self.parse(input));
        };

        let resolved = short.resolve_short_url(&prepared, options).await?;
        debug!(platform = short.id(), from = %prepared, to = %resolved, "Parsing resolved short link");

        let mut result = self.parse(&resolved);
        result.original_url = input.to_string();
        Ok(result)
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new(&PLATFORMS)
    }
}

/// Merge an extraction payload into a result.
///
/// Username and user id are only overwritten by non-empty values; ids and
/// metadata are merged key by key with the payload winning.
fn merge_extraction(result: &mut ParseResult, extraction: Extraction) {
    if let Some(username) = extraction.username.filter(|u| !u.is_empty()) {
        result.username = Some(username);
    }
    if let Some(user_id) = extraction.user_id.filter(|u| !u.is_empty()) {
        result.user_id = Some(user_id);
    }
    result.ids.extend(extraction.ids);
    result.metadata.extend(extraction.metadata);
}

/// Platform normalization, then the generic pass for plain http(s) output.
fn normalize_for(platform: &dyn Platform, prepared: &str) -> String {
    let normalized = platform.normalize_url(prepared);
    if normalize::is_http_url(&normalized) {
        normalize::normalize(&normalized)
    } else {
        normalized
    }
}
