//! Platform pattern sets and the pattern enhancer.
//!
//! Patterns are authored tightly anchored (`^...$`). When a [`PatternSet`] is
//! built, the profile pattern and every content pattern are rewritten by
//! [`enhance_pattern`] so they also accept a trailing slash, a query string and
//! a fragment. The handle pattern validates bare handles and is left as is.
//!
//! Named capture groups carry the extracted data:
//!
//! * `user` - the username
//! * `uid` - an opaque user id
//! * `id` - the content id, stored under the content pattern's id key
//!
//! Any other named group is copied into the extraction metadata.

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;

use super::traits::Extraction;

/// Optional query string followed by an optional fragment.
///
/// Its presence in a pattern source marks the pattern as already enhanced.
pub const QUERY_AND_HASH: &str = r"(?:\?[^#]*)?(?:#.*)?";

/// Content type reported for a profile match.
pub const PROFILE: &str = "profile";

/// Content type of redirect-based short links.
pub const SHORT_LINK: &str = "shortLink";

#[derive(Debug, Error)]
#[error("invalid pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Make an anchored pattern tolerate a trailing slash, query string and fragment.
///
/// Sources already containing [`QUERY_AND_HASH`] are returned unchanged, so
/// enhancing twice is the same as enhancing once.
#[must_use]
pub fn enhance_pattern(source: &str) -> Cow<'_, str> {
    if source.contains(QUERY_AND_HASH) {
        return Cow::Borrowed(source);
    }

    let (body, anchored) = match source.strip_suffix('$') {
        Some(body) if !body.ends_with('\\') => (body, true),
        _ => (source, false),
    };

    let mut enhanced = String::with_capacity(body.len() + QUERY_AND_HASH.len() + 4);
    enhanced.push_str(body);
    if !body.ends_with("/?") {
        enhanced.push_str("/?");
    }
    enhanced.push_str(QUERY_AND_HASH);
    if anchored {
        enhanced.push('$');
    }
    Cow::Owned(enhanced)
}

/// A named content pattern, e.g. `video` ids stored under `videoId`.
#[derive(Debug, Clone)]
pub struct ContentPattern {
    pub content_type: &'static str,
    pub id_key: &'static str,
    pub regex: Regex,
}

/// What a pattern set matched in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// `profile` or the content pattern's type.
    pub content_type: &'static str,
    /// Key the content id is stored under. Empty for profile matches.
    pub id_key: &'static str,
    pub user: Option<String>,
    pub user_id: Option<String>,
    pub id: Option<String>,
    /// Any other named groups that matched.
    pub extra: BTreeMap<String, String>,
}

impl PatternMatch {
    #[must_use]
    pub fn is_profile(&self) -> bool {
        self.content_type == PROFILE
    }

    /// Turn the match into an extraction payload.
    #[must_use]
    pub fn into_extraction(self) -> Extraction {
        let mut extraction = Extraction::for_content_type(self.content_type);
        extraction.username = self.user;
        extraction.user_id = self.user_id;
        if let Some(id) = self.id {
            if !self.id_key.is_empty() {
                extraction.ids.insert(self.id_key.to_string(), id);
            }
        }
        for (key, value) in self.extra {
            extraction.metadata.insert(key, Value::String(value));
        }
        extraction
    }
}

/// The compiled, enhanced patterns of one platform.
#[derive(Debug, Clone)]
pub struct PatternSet {
    profile: Regex,
    handle: Regex,
    content: Vec<ContentPattern>,
    reserved: &'static [&'static str],
}

impl PatternSet {
    /// Start building a pattern set from profile and handle sources.
    #[must_use]
    pub fn builder(profile: &str, handle: &str) -> PatternSetBuilder {
        PatternSetBuilder {
            profile: profile.to_string(),
            handle: handle.to_string(),
            content: Vec::new(),
            reserved: &[],
        }
    }

    #[must_use]
    pub fn profile(&self) -> &Regex {
        &self.profile
    }

    #[must_use]
    pub fn handle(&self) -> &Regex {
        &self.handle
    }

    #[must_use]
    pub fn content(&self) -> &[ContentPattern] {
        &self.content
    }

    /// Path segments that look like usernames but are site pages.
    #[must_use]
    pub fn reserved(&self) -> &'static [&'static str] {
        self.reserved
    }

    /// Check whether `name` is one of the reserved path segments.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r.eq_ignore_ascii_case(name))
    }

    /// Validate a bare handle against the handle pattern.
    #[must_use]
    pub fn is_valid_handle(&self, handle: &str) -> bool {
        self.handle.is_match(handle) && !self.is_reserved(handle.trim_start_matches('@'))
    }

    /// Match content patterns in order, then the profile pattern.
    ///
    /// A match whose `user` group is a reserved word is skipped.
    #[must_use]
    pub fn match_url(&self, text: &str) -> Option<PatternMatch> {
        self.content
            .iter()
            .find_map(|pattern| {
                let caps = pattern.regex.captures(text)?;
                self.accept(&pattern.regex, &caps, pattern.content_type, pattern.id_key)
            })
            .or_else(|| {
                let caps = self.profile.captures(text)?;
                self.accept(&self.profile, &caps, PROFILE, "")
            })
    }

    /// Match and convert straight into an extraction payload.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<Extraction> {
        self.match_url(text).map(PatternMatch::into_extraction)
    }

    fn accept(
        &self,
        regex: &Regex,
        caps: &Captures<'_>,
        content_type: &'static str,
        id_key: &'static str,
    ) -> Option<PatternMatch> {
        let group = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty())
        };

        let user = group("user");
        if user.as_deref().is_some_and(|u| self.is_reserved(u)) {
            return None;
        }

        let extra = regex
            .capture_names()
            .flatten()
            .filter(|name| !matches!(*name, "user" | "uid" | "id"))
            .filter_map(|name| group(name).map(|value| (name.to_string(), value)))
            .collect();

        Some(PatternMatch {
            content_type,
            id_key,
            user,
            user_id: group("uid"),
            id: group("id"),
            extra,
        })
    }
}

/// Builder for [`PatternSet`]; enhancement happens in [`PatternSetBuilder::build`].
#[derive(Debug, Clone)]
pub struct PatternSetBuilder {
    profile: String,
    handle: String,
    content: Vec<(&'static str, &'static str, String)>,
    reserved: &'static [&'static str],
}

impl PatternSetBuilder {
    /// Add a content pattern. Earlier patterns win when several match.
    #[must_use]
    pub fn content(
        mut self,
        content_type: &'static str,
        id_key: &'static str,
        source: impl Into<String>,
    ) -> Self {
        self.content.push((content_type, id_key, source.into()));
        self
    }

    #[must_use]
    pub fn reserved(mut self, reserved: &'static [&'static str]) -> Self {
        self.reserved = reserved;
        self
    }

    /// Enhance and compile every pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern fails to compile.
    pub fn build(self) -> Result<PatternSet, PatternError> {
        let content = self
            .content
            .into_iter()
            .map(|(content_type, id_key, source)| {
                Ok(ContentPattern {
                    content_type,
                    id_key,
                    regex: compile(&enhance_pattern(&source))?,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        Ok(PatternSet {
            profile: compile(&enhance_pattern(&self.profile))?,
            handle: compile(&self.handle)?,
            content,
            reserved: self.reserved,
        })
    }
}

fn compile(source: &str) -> Result<Regex, PatternError> {
    Regex::new(source).map_err(|source_err| PatternError {
        pattern: source.to_string(),
        source: source_err,
    })
}
