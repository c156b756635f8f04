//! Phone-number normalization behind a trait.
//!
//! The phone platform only needs "given text, a normalized number or nothing".
//! [`BasicPhoneParser`] covers E.164 input and bare North American numbers;
//! callers needing full numbering-plan rules plug in their own parser.

use std::sync::LazyLock;

use regex::Regex;

/// Characters allowed in a phone-number candidate.
static PHONE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().\-]*[0-9]$").expect("valid phone shape regex")
});

/// Minimum and maximum digit counts of an E.164 number.
const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Opaque phone-number capability.
pub trait PhoneNumberParser: Send + Sync {
    /// Normalize `text` to E.164 (`+15551234567`), or `None` if it is not a phone number.
    fn normalize(&self, text: &str) -> Option<String>;
}

/// Default parser: digit counting plus a NANP fallback for 10-digit input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPhoneParser;

impl PhoneNumberParser for BasicPhoneParser {
    fn normalize(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if !PHONE_SHAPE.is_match(text) {
            return None;
        }

        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return None;
        }

        if text.starts_with('+') {
            Some(format!("+{digits}"))
        } else if digits.len() == 10 {
            Some(format!("+1{digits}"))
        } else if digits.len() == 11 && digits.starts_with('1') {
            Some(format!("+{digits}"))
        } else {
            None
        }
    }
}
