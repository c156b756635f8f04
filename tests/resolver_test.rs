//! Integration tests for short-link resolution and the async embed path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use social_link_parser::config::ResolverConfig;
use social_link_parser::platforms::pinterest::Pinterest;
use social_link_parser::platforms::reddit::Reddit;
use social_link_parser::platforms::spotify::Spotify;
use social_link_parser::platforms::tiktok::TikTok;
use social_link_parser::platforms::youtube::YouTube;
use social_link_parser::platforms::{EmbedCapability, Platform, ShortLinkCapability};
use social_link_parser::resolver::{HttpResolver, ResolverOptions, UrlResolver};
use social_link_parser::Parser;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Resolver backed by a fixed redirect table; unknown URLs do not redirect.
struct MapResolver {
    routes: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MapResolver {
    fn new(routes: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            routes: routes
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlResolver for MapResolver {
    async fn resolve(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.routes.get(url).cloned().unwrap_or_else(|| url.to_string()))
    }
}

struct FailingResolver;

#[async_trait]
impl UrlResolver for FailingResolver {
    async fn resolve(&self, url: &str) -> Result<String> {
        bail!("connection refused for {url}")
    }
}

fn http_resolver() -> HttpResolver {
    HttpResolver::new(&ResolverConfig::default()).expect("Failed to build resolver")
}

#[tokio::test]
async fn test_http_resolver_reads_location() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/abc123"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", "https://www.tiktok.com/@user/video/123"),
        )
        .mount(&server)
        .await;

    let resolved = http_resolver()
        .resolve(&format!("{}/abc123", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://www.tiktok.com/@user/video/123");
}

#[tokio::test]
async fn test_http_resolver_joins_relative_location() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/full/path"))
        .mount(&server)
        .await;

    let resolved = http_resolver()
        .resolve(&format!("{}/short", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, format!("{}/full/path", server.uri()));
}

#[tokio::test]
async fn test_http_resolver_falls_back_to_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/get-only"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/get-only"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "https://www.pinterest.com/pin/99360735500167749/"),
        )
        .mount(&server)
        .await;

    let resolved = http_resolver()
        .resolve(&format!("{}/get-only", server.uri()))
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://www.pinterest.com/pin/99360735500167749/");
}

#[tokio::test]
async fn test_http_resolver_non_redirect_is_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/page", server.uri());
    let resolved = http_resolver().resolve(&url).await.expect("resolves");
    assert_eq!(resolved, url);
}

#[tokio::test]
async fn test_tiktok_async_embed_follows_short_link() {
    let resolver = MapResolver::new(&[(
        "https://vm.tiktok.com/ZMabc123/",
        "https://www.tiktok.com/@scout2015/video/6718335390845095173?_r=1",
    )]);
    let options = ResolverOptions::with_resolver(resolver.clone());
    let platform = TikTok::new();

    assert!(platform.embed_data("https://vm.tiktok.com/ZMabc123/").is_none());

    let info = platform
        .embed_info_async("https://vm.tiktok.com/ZMabc123/", &options)
        .await
        .expect("resolves")
        .expect("resolved video embeds");
    assert_eq!(info.platform, "tiktok");
    assert_eq!(info.content_id, "6718335390845095173");
    assert_eq!(
        info.embed_url,
        "https://www.tiktok.com/embed/v2/6718335390845095173"
    );
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn test_async_embed_matches_sync_for_regular_urls() {
    let resolver = MapResolver::new(&[]);
    let options = ResolverOptions::with_resolver(resolver.clone());

    let youtube = YouTube::new();
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42";
    let sync = youtube.embed_data(url);
    let resolved = youtube
        .embed_info_async(url, &options)
        .await
        .expect("no resolution needed");
    assert_eq!(resolved, sync);
    assert!(sync.is_some());

    let tiktok = TikTok::new();
    let url = "https://www.tiktok.com/@user/video/123";
    assert_eq!(
        tiktok.embed_info_async(url, &options).await.expect("no resolution needed"),
        tiktok.embed_data(url)
    );

    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_pinterest_and_spotify_short_links() {
    let resolver = MapResolver::new(&[
        ("https://pin.it/4XyZabc", "https://www.pinterest.com/pin/99360735500167749/"),
        (
            "https://spotify.link/AbCdEf123",
            "https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh?si=x",
        ),
    ]);
    let options = ResolverOptions::with_resolver(resolver);

    let pin = Pinterest::new()
        .embed_info_async("https://pin.it/4XyZabc", &options)
        .await
        .expect("resolves")
        .expect("pin embeds");
    assert_eq!(
        pin.embed_url,
        "https://assets.pinterest.com/ext/embed.html?id=99360735500167749"
    );
    assert_eq!(pin.content_id, "99360735500167749");

    let track = Spotify::new()
        .embed_info_async("https://spotify.link/AbCdEf123", &options)
        .await
        .expect("resolves")
        .expect("track embeds");
    assert_eq!(
        track.embed_url,
        "https://open.spotify.com/embed/track/4iV5W9uYEdYUVa79Axb7Rh"
    );
    assert_eq!(track.content_id, "4iV5W9uYEdYUVa79Axb7Rh");
    assert_eq!(track.platform, "spotify");
}

#[tokio::test]
async fn test_resolution_stops_at_hop_limit() {
    let resolver = MapResolver::new(&[
        ("https://vm.tiktok.com/a/", "https://vm.tiktok.com/b/"),
        ("https://vm.tiktok.com/b/", "https://vm.tiktok.com/c/"),
        ("https://vm.tiktok.com/c/", "https://www.tiktok.com/@user/video/1"),
    ]);
    let platform = TikTok::new();

    let options = ResolverOptions::with_resolver(resolver.clone()).max_hops_limit(1);
    let resolved = platform
        .resolve_short_url("https://vm.tiktok.com/a/", &options)
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://vm.tiktok.com/b/");

    let options = ResolverOptions::with_resolver(resolver.clone());
    let resolved = platform
        .resolve_short_url("https://vm.tiktok.com/a/", &options)
        .await
        .expect("resolves");
    assert_eq!(resolved, "https://www.tiktok.com/@user/video/1");
    assert_eq!(resolver.calls(), 4);
}

#[tokio::test]
async fn test_resolver_errors_propagate() {
    let options = ResolverOptions::with_resolver(Arc::new(FailingResolver));

    let err = TikTok::new()
        .embed_info_async("https://vm.tiktok.com/ZMabc123/", &options)
        .await
        .expect_err("resolver failure surfaces");
    assert!(format!("{err:#}").contains("connection refused"));
}

#[tokio::test]
async fn test_platform_without_embed_returns_none() {
    let resolver = MapResolver::new(&[]);
    let options = ResolverOptions::with_resolver(resolver.clone());

    let info = Reddit::new()
        .embed_info_async("https://redd.it/abc123", &options)
        .await
        .expect("no resolution attempted");
    assert!(info.is_none());
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_parse_resolved_follows_share_link() {
    let resolver = MapResolver::new(&[(
        "https://www.reddit.com/r/rust/s/AbCdEf",
        "https://www.reddit.com/r/rust/comments/abc123/title_here/?share_id=x",
    )]);
    let options = ResolverOptions::with_resolver(resolver);
    let parser = Parser::default();

    let result = parser
        .parse_resolved("https://www.reddit.com/r/rust/s/AbCdEf", &options)
        .await
        .expect("resolves");
    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("reddit"));
    assert_eq!(result.ids["postId"], "abc123");
    assert_eq!(result.original_url, "https://www.reddit.com/r/rust/s/AbCdEf");
}

#[tokio::test]
async fn test_parse_resolved_without_short_link_is_parse() {
    let resolver = MapResolver::new(&[]);
    let options = ResolverOptions::with_resolver(resolver.clone());
    let parser = Parser::default();

    for input in ["https://youtu.be/dQw4w9WgXcQ", "not-a-url", "user@example.com"] {
        let resolved = parser
            .parse_resolved(input, &options)
            .await
            .expect("no resolution needed");
        assert_eq!(resolved, parser.parse(input), "input {input}");
    }
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_post_with_s_slug_is_not_followed() {
    let input = "https://www.reddit.com/r/rust/comments/abc123/s/";
    let resolver = MapResolver::new(&[(
        input,
        "https://www.reddit.com/r/other/comments/zzz999/elsewhere/",
    )]);
    let options = ResolverOptions::with_resolver(resolver.clone());
    let parser = Parser::default();

    let resolved = parser
        .parse_resolved(input, &options)
        .await
        .expect("no resolution needed");
    assert_eq!(resolved, parser.parse(input));
    assert_eq!(resolved.ids["postId"], "abc123");
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_async_embed_matches_parse_descriptor() {
    let resolver = MapResolver::new(&[]);
    let options = ResolverOptions::with_resolver(resolver);

    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1m30s";
    let from_async = YouTube::new()
        .embed_info_async(url, &options)
        .await
        .expect("no resolution needed");
    assert_eq!(from_async, Parser::default().parse(url).embed_data);
}
