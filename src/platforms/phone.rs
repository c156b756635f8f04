use std::sync::LazyLock;

use super::patterns::PatternSet;
use super::traits::{Extraction, Platform};
use crate::phone::{BasicPhoneParser, PhoneNumberParser};

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| {
    PatternSet::builder(
        r"(?i)^(?:tel:)?(?P<user>\+?[0-9(][0-9 ().\-]{5,}[0-9])$",
        r"^\+?[0-9(][0-9 ().\-]{5,}[0-9]$",
    )
    .build()
    .expect("valid phone patterns")
});

/// Phone numbers, bare or as `tel:` links.
///
/// The pattern only finds candidates; whether a candidate is a number is up
/// to the [`PhoneNumberParser`].
pub struct Phone {
    parser: Box<dyn PhoneNumberParser>,
}

impl Phone {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parser(BasicPhoneParser)
    }

    #[must_use]
    pub fn with_parser(parser: impl PhoneNumberParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }

    /// The normalized number found in `text`.
    fn number(&self, text: &str) -> Option<String> {
        let candidate = PATTERNS.match_url(text)?.user?;
        self.parser.normalize(&candidate)
    }
}

impl Default for Phone {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Phone {
    fn id(&self) -> &'static str {
        "phone"
    }

    fn name(&self) -> &'static str {
        "Phone"
    }

    fn domains(&self) -> &'static [&'static str] {
        &[]
    }

    fn patterns(&self) -> &PatternSet {
        &PATTERNS
    }

    fn detect(&self, text: &str) -> bool {
        self.number(text).is_some()
    }

    fn extract(&self, text: &str) -> Option<Extraction> {
        let number = self.number(text)?;
        Some(Extraction::profile(number).with_meta("isPhone", true))
    }

    fn validate_handle(&self, handle: &str) -> bool {
        PATTERNS.is_valid_handle(handle) && self.parser.normalize(handle).is_some()
    }

    fn build_profile_url(&self, username: &str) -> String {
        format!("tel:{username}")
    }

    fn normalize_url(&self, url: &str) -> String {
        self.number(url)
            .map_or_else(|| url.to_string(), |number| format!("tel:{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectAll;

    impl PhoneNumberParser for RejectAll {
        fn normalize(&self, _text: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_detect() {
        let platform = Phone::new();

        assert!(platform.detect("+1 555 123 4567"));
        assert!(platform.detect("tel:+442079460958"));
        assert!(platform.detect("(555) 123-4567"));

        assert!(!platform.detect("12345"));
        assert!(!platform.detect("https://example.com/5551234567"));
        assert!(!platform.detect("user@example.com"));
    }

    #[test]
    fn test_extract() {
        let extraction = Phone::new()
            .extract("tel:(555) 123-4567")
            .expect("number extracts");
        assert_eq!(extraction.username.as_deref(), Some("+15551234567"));
        assert!(extraction.is_profile());
    }

    #[test]
    fn test_normalize_and_build() {
        let platform = Phone::new();
        assert_eq!(platform.normalize_url("555.123.4567"), "tel:+15551234567");
        assert_eq!(platform.normalize_url("hello"), "hello");
        assert_eq!(platform.build_profile_url("+15551234567"), "tel:+15551234567");
    }

    #[test]
    fn test_custom_parser() {
        let platform = Phone::with_parser(RejectAll);
        assert!(!platform.detect("+1 555 123 4567"));
        assert!(platform.extract("+1 555 123 4567").is_none());
        assert!(!platform.validate_handle("+15551234567"));
    }
}
