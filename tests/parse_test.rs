//! Integration tests for end-to-end parsing.

use serde_json::Value;
use social_link_parser::normalize::normalize;
use social_link_parser::platforms::default_registry;
use social_link_parser::{detect_platform, get_platform, parse, Parser};

#[test]
fn test_youtube_short_link_with_embed() {
    let result = parse("https://youtu.be/dQw4w9WgXcQ");

    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("youtube"));
    assert_eq!(result.platform_name.as_deref(), Some("YouTube"));
    assert_eq!(result.ids["videoId"], "dQw4w9WgXcQ");
    assert_eq!(result.metadata["isVideo"], Value::Bool(true));

    let embed = result.embed_data.expect("youtube video has embed data");
    assert_eq!(embed.embed_url, "https://www.youtube.com/embed/dQw4w9WgXcQ");
    assert_eq!(embed.content_id, "dQw4w9WgXcQ");
    assert_eq!(embed.platform, "youtube");
    assert_eq!(embed.kind.as_str(), "iframe");
}

#[test]
fn test_bare_domain_profile() {
    let result = parse("instagram.com/nasa");

    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("instagram"));
    assert_eq!(result.normalized_url, "https://instagram.com/nasa");
    assert_eq!(result.username.as_deref(), Some("nasa"));
    assert_eq!(result.original_url, "instagram.com/nasa");
    assert_eq!(
        result.canonical_url.as_deref(),
        Some("https://instagram.com/nasa")
    );
    assert!(result.flag("isProfile"));
}

#[test]
fn test_email_address() {
    let result = parse("user@example.com");

    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("email"));
    assert_eq!(result.username.as_deref(), Some("user@example.com"));
    assert_eq!(result.normalized_url, "mailto:user@example.com");
}

#[test]
fn test_phone_number() {
    let result = parse("(555) 123-4567");

    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("phone"));
    assert_eq!(result.username.as_deref(), Some("+15551234567"));
    assert_eq!(result.normalized_url, "tel:+15551234567");
    assert_eq!(result.canonical_url.as_deref(), Some("tel:+15551234567"));
}

#[test]
fn test_unrecognized_input() {
    let result = parse("not-a-url");

    assert!(!result.is_valid);
    assert!(result.platform.is_none());
    assert!(result.platform_name.is_none());
    assert!(result.ids.is_empty());
    assert!(result.metadata.is_empty());
    assert_eq!(result.normalized_url, "not-a-url");
}

#[test]
fn test_spotify_requires_open_subdomain() {
    let result = parse("spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh");
    assert!(!result.is_valid);
    assert!(result.platform.is_none());

    let result = parse("open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh");
    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("spotify"));
    assert_eq!(result.ids["trackId"], "4iV5W9uYEdYUVa79Axb7Rh");
    assert_eq!(
        result.embed_data.map(|embed| embed.content_id).as_deref(),
        Some("4iV5W9uYEdYUVa79Axb7Rh")
    );
}

#[test]
fn test_tracking_params_stripped() {
    let result = parse("https://www.instagram.com/p/ABC123/?igshid=xyz&utm_source=ig_web");
    assert_eq!(result.normalized_url, "https://instagram.com/p/ABC123");

    let result = parse("http://github.com/rust-lang/rust/?utm_medium=social");
    assert_eq!(result.normalized_url, "https://github.com/rust-lang/rust");
}

#[test]
fn test_normalize_idempotent() {
    let inputs = [
        "https://youtu.be/dQw4w9WgXcQ?si=abc",
        "http://twitter.com/jack/status/20?s=20&utm_source=x",
        "instagram.com/nasa/",
        "https://www.reddit.com/r/rust/comments/abc123/title/?utm_medium=web",
        "example.com/path?fbclid=1&q=2",
        "mailto:user@example.com",
    ];
    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "generic pass for {input}");

        let parsed = parse(input).normalized_url;
        assert_eq!(parse(&parsed).normalized_url, parsed, "parse for {input}");
    }
}

#[test]
fn test_embed_content_id_precedence() {
    // A TikTok video carries a videoId and its author; the video id wins.
    let result = parse("https://www.tiktok.com/@scout2015/video/6718335390845095173");
    assert_eq!(
        result.embed_data.map(|embed| embed.content_id).as_deref(),
        Some("6718335390845095173")
    );

    // Instagram posts only carry a postId.
    let result = parse("https://www.instagram.com/p/ABC123/");
    assert_eq!(
        result.embed_data.map(|embed| embed.content_id).as_deref(),
        Some("ABC123")
    );

    // Pins only carry a pinId.
    let result = parse("https://www.pinterest.com/pin/99360735500167749/");
    assert_eq!(
        result.embed_data.map(|embed| embed.content_id).as_deref(),
        Some("99360735500167749")
    );
}

#[test]
fn test_embed_input_sets_flag() {
    let result = parse("https://open.spotify.com/embed/track/4iV5W9uYEdYUVa79Axb7Rh");
    assert!(result.flag("isEmbed"));

    let result = parse("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh");
    assert!(!result.flag("isEmbed"));
}

#[test]
fn test_embed_prefixed_names_are_not_embed_forms() {
    let result = parse("https://x.com/embedly/status/20");
    assert!(result.is_valid);
    assert_eq!(result.username.as_deref(), Some("embedly"));
    assert!(result.embed_data.is_some());
    assert!(!result.flag("isEmbed"));

    let result = parse("https://www.instagram.com/embed.artist/p/ABC123");
    assert!(result.is_valid);
    assert_eq!(result.ids["postId"], "ABC123");
    assert!(!result.flag("isEmbed"));

    let result = parse("https://www.instagram.com/p/ABC123/embed/");
    assert!(result.flag("isEmbed"));
}

#[test]
fn test_youtube_timestamp() {
    let result = parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1m30s");
    assert_eq!(result.metadata["timestamp"], Value::from(90));

    let embed = result.embed_data.expect("video embeds");
    let options = embed.options.expect("start option");
    assert_eq!(options["start"], Value::from(90));
}

#[test]
fn test_short_link_has_no_sync_embed() {
    let result = parse("https://vm.tiktok.com/ZMabc123/");
    assert!(result.is_valid);
    assert_eq!(result.platform.as_deref(), Some("tiktok"));
    assert!(result.flag("isShortLink"));
    assert!(result.embed_data.is_none());
}

#[test]
fn test_youtube_music_before_youtube() {
    let result = parse("https://music.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(result.platform.as_deref(), Some("youtube_music"));

    let result = parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(result.platform.as_deref(), Some("youtube"));
}

#[test]
fn test_twitter_hosts_collapse_to_x() {
    let result = parse("https://mobile.twitter.com/jack/status/20?s=20");
    assert_eq!(result.normalized_url, "https://x.com/jack/status/20");
    assert_eq!(result.username.as_deref(), Some("jack"));
    assert!(result.canonical_url.is_none());
}

#[test]
fn test_user_id_profiles() {
    let result = parse("https://www.facebook.com/profile.php?id=100004");
    assert!(result.is_valid);
    assert_eq!(result.user_id.as_deref(), Some("100004"));
    assert!(result.username.is_none());
    assert!(result.canonical_url.is_none());
}

#[test]
fn test_serialized_shape() {
    let result = parse("https://youtu.be/dQw4w9WgXcQ");
    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["isValid"], Value::Bool(true));
    assert_eq!(json["platform"], Value::from("youtube"));
    assert_eq!(json["ids"]["videoId"], Value::from("dQw4w9WgXcQ"));
    assert_eq!(json["embedData"]["type"], Value::from("iframe"));
    assert_eq!(json["embedData"]["contentId"], Value::from("dQw4w9WgXcQ"));
}

#[test]
fn test_free_functions_match_explicit_parser() {
    let registry = default_registry();
    let parser = Parser::new(&registry);

    for input in [
        "https://x.com/jack",
        "instagram.com/nasa",
        "user@example.com",
        "not-a-url",
    ] {
        assert_eq!(parser.parse(input), parse(input), "input {input}");
    }

    assert_eq!(
        detect_platform("https://bsky.app/profile/alice.bsky.social").map(|p| p.id()),
        Some("bluesky")
    );
    assert_eq!(get_platform("github").map(|p| p.name()), Some("GitHub"));
    assert!(get_platform("myspace").is_none());
}
