//! Shared constants used across the crate.

/// User agent sent when following short links.
///
/// Several short-link services answer non-browser agents with an interstitial
/// page instead of a redirect.
pub const RESOLVER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default timeout for a single short-link request, in seconds.
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 10;

/// Default number of redirect hops followed for one short link.
pub const DEFAULT_RESOLVER_MAX_REDIRECTS: usize = 5;
