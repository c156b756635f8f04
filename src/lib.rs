//! Social link parser library.
//!
//! Classifies an input string (URL, bare domain, handle, email address or
//! phone number) against a catalogue of known platforms, extracts identity and
//! content ids, canonicalizes the link and derives an embeddable form.
//!
//! ```
//! let result = social_link_parser::parse("https://youtu.be/dQw4w9WgXcQ");
//! assert!(result.is_valid);
//! assert_eq!(result.platform.as_deref(), Some("youtube"));
//! assert_eq!(result.ids["videoId"], "dQw4w9WgXcQ");
//! ```
//!
//! Parsing never performs I/O. Short links are only followed through the
//! explicit async entry points ([`Parser::parse_resolved`] and
//! [`platforms::Platform::embed_info_async`]).

#![allow(clippy::needless_raw_string_hashes)]

pub mod config;
pub mod constants;
pub mod normalize;
pub mod parser;
pub mod phone;
pub mod platforms;
pub mod resolver;
pub mod result;

pub use parser::{prepare_input, Parser};
pub use platforms::{Platform, PlatformRegistry, PLATFORMS};
pub use result::{EmbedData, EmbedKind, ParseResult};

/// Parse an input against the built-in platforms.
#[must_use]
pub fn parse(input: &str) -> ParseResult {
    Parser::default().parse(input)
}

/// The built-in platform an input dispatches to, if any.
#[must_use]
pub fn detect_platform(input: &str) -> Option<&'static dyn Platform> {
    Parser::default().detect_platform(input)
}

/// Look up a built-in platform by id.
#[must_use]
pub fn get_platform(id: &str) -> Option<&'static dyn Platform> {
    PLATFORMS.get(id)
}
