mod patterns;
mod registry;
mod traits;

// Platforms
pub mod bluesky;
pub mod email;
pub mod facebook;
pub mod github;
pub mod instagram;
pub mod linkedin;
pub mod phone;
pub mod pinterest;
pub mod reddit;
pub mod soundcloud;
pub mod spotify;
pub mod threads;
pub mod tiktok;
pub mod twitch;
pub mod twitter;
pub mod vimeo;
pub mod youtube;
pub mod youtube_music;

pub use patterns::{
    enhance_pattern, ContentPattern, PatternError, PatternMatch, PatternSet, PatternSetBuilder,
    PROFILE, QUERY_AND_HASH, SHORT_LINK,
};
pub use registry::PlatformRegistry;
pub use traits::{
    content_flag, EmbedCapability, EmbedInfo, Extraction, Platform, ShortLinkCapability,
    TimestampCapability,
};

/// Process-wide registry with every built-in platform.
///
/// Built once on first use and read-only afterwards.
pub static PLATFORMS: std::sync::LazyLock<PlatformRegistry> =
    std::sync::LazyLock::new(default_registry);

/// Build a registry with every built-in platform in dispatch order.
///
/// Order matters where domains overlap: `youtube_music` must come before
/// `youtube`, whose patterns also accept the `music.youtube.com` host.
#[must_use]
pub fn default_registry() -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();
    registry.register(Box::new(email::Email::new()));
    registry.register(Box::new(phone::Phone::new()));
    registry.register(Box::new(youtube_music::YouTubeMusic::new()));
    registry.register(Box::new(youtube::YouTube::new()));
    registry.register(Box::new(spotify::Spotify::new()));
    registry.register(Box::new(soundcloud::SoundCloud::new()));
    registry.register(Box::new(instagram::Instagram::new()));
    registry.register(Box::new(threads::Threads::new()));
    registry.register(Box::new(twitter::Twitter::new()));
    registry.register(Box::new(tiktok::TikTok::new()));
    registry.register(Box::new(reddit::Reddit::new()));
    registry.register(Box::new(facebook::Facebook::new()));
    registry.register(Box::new(linkedin::LinkedIn::new()));
    registry.register(Box::new(github::GitHub::new()));
    registry.register(Box::new(twitch::Twitch::new()));
    registry.register(Box::new(vimeo::Vimeo::new()));
    registry.register(Box::new(pinterest::Pinterest::new()));
    registry.register(Box::new(bluesky::Bluesky::new()));
    registry
}
