//! Generic URL normalization primitives.
//!
//! These are plain string transforms shared by every platform. Platform
//! normalizers run first and may call [`strip_params`] with their own extra
//! tracking parameters; the parser then applies [`normalize`] to anything
//! that is still a plain http(s) URL.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

/// Tracking parameters stripped from every http(s) URL.
///
/// Matching is by exact key. Platform-specific variants (`si`, `ref_src`, ...)
/// are stripped by the platform normalizers.
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "igshid",
];

/// Base used to parse scheme-less input so its query can be edited.
const PLACEHOLDER_BASE: &str = "https://placeholder.invalid/";

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|mailto:|tel:|sms:)").expect("valid scheme regex")
});

/// Check whether the input already carries a scheme (`https://`, `mailto:`, ...).
#[must_use]
pub fn has_scheme(url: &str) -> bool {
    SCHEME.is_match(url)
}

/// Check whether the input is an http or https URL.
#[must_use]
pub fn is_http_url(url: &str) -> bool {
    starts_with_ignore_case(url, "https://") || starts_with_ignore_case(url, "http://")
}

/// Force the `https` scheme.
///
/// `http://` is upgraded, scheme-less input gets `https://` prepended and any
/// other scheme is left alone.
#[must_use]
pub fn ensure_https(url: &str) -> String {
    if starts_with_ignore_case(url, "http://") {
        format!("https://{}", &url["http://".len()..])
    } else if has_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Remove the shared [`TRACKING_PARAMS`] from the query string.
#[must_use]
pub fn strip_tracking_params(url: &str) -> String {
    strip_params(url, TRACKING_PARAMS)
}

/// Remove every query parameter whose key is exactly one of `params`.
///
/// Input that cannot be parsed as a URL, even against a placeholder base, is
/// returned unchanged. Input without any of the listed keys is also returned
/// byte-for-byte, so the function never reformats URLs it does not touch.
#[must_use]
pub fn strip_params(url: &str, params: &[&str]) -> String {
    let (mut parsed, relative) = match parse_with_placeholder(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(url, error = %e, "Could not parse URL for parameter stripping, keeping as-is");
            return url.to_string();
        }
    };

    if !parsed
        .query_pairs()
        .any(|(key, _)| params.contains(&key.as_ref()))
    {
        return url.to_string();
    }

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !params.contains(&key.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }

    let stripped = parsed.to_string();
    if relative {
        stripped
            .strip_prefix(PLACEHOLDER_BASE)
            .map_or_else(|| stripped.clone(), str::to_string)
    } else {
        stripped
    }
}

/// Strip exactly one trailing slash.
#[must_use]
pub fn remove_trailing_slash(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Generic normalization: scheme, then tracking parameters, then trailing slash.
#[must_use]
pub fn normalize(url: &str) -> String {
    remove_trailing_slash(&strip_tracking_params(&ensure_https(url)))
}

/// Replace the host part of an http(s) URL when it is one of `from`.
///
/// Works on the raw string so the rest of the URL keeps its exact form.
#[must_use]
pub fn replace_host(url: &str, from: &[&str], to: &str) -> String {
    let Some(scheme_end) = url.find("://").map(|i| i + 3) else {
        return url.to_string();
    };
    let rest = &url[scheme_end..];
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..host_end];

    if from.iter().any(|candidate| host.eq_ignore_ascii_case(candidate)) {
        format!("{}{}{}", &url[..scheme_end], to, &rest[host_end..])
    } else {
        url.to_string()
    }
}

/// Drop the query string and fragment.
#[must_use]
pub fn strip_query_and_fragment(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |pos| &url[..pos])
}

/// Check whether a path segment of `url` equals `segment`, ignoring ASCII case.
///
/// The host and the query string are not path segments, so `x.com/embedly`
/// has no `embed` segment while `youtube.com/embed/ID` does.
#[must_use]
pub fn has_path_segment(url: &str, segment: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    strip_query_and_fragment(rest)
        .split('/')
        .skip(1)
        .any(|part| part.eq_ignore_ascii_case(segment))
}

fn parse_with_placeholder(url: &str) -> Result<(Url, bool), url::ParseError> {
    match Url::parse(url) {
        Ok(parsed) => Ok((parsed, false)),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(PLACEHOLDER_BASE)?;
            Ok((base.join(url)?, true))
        }
        Err(e) => Err(e),
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
