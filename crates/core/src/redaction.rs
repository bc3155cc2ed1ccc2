//! Redaction engine.
//!
//! Strips phone numbers, email addresses, card-like numbers, and national ID
//! patterns from free text before it is stored as the public description.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder for redacted phone numbers.
pub const PHONE_PLACEHOLDER: &str = "[PHONE_REDACTED]";
/// Placeholder for redacted email addresses.
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL_REDACTED]";
/// Placeholder for redacted card numbers.
pub const CARD_PLACEHOLDER: &str = "[CARD_REDACTED]";
/// Placeholder for redacted national ID numbers.
pub const ID_PLACEHOLDER: &str = "[ID_REDACTED]";

/// One rule per category, applied as independent sequential passes. Each
/// pass runs over the previous pass's output, so text matching several rules
/// is redacted by all of them.
#[allow(clippy::unwrap_used)]
static RULES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        // Country code or a single leading zero, then exactly nine digits.
        (Regex::new(r"(\+233|0)\d{9}").unwrap(), PHONE_PLACEHOLDER),
        (
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
            EMAIL_PLACEHOLDER,
        ),
        // Four groups of four digits, optionally whitespace-separated.
        (
            Regex::new(r"\b\d{4}\s*\d{4}\s*\d{4}\s*\d{4}\b").unwrap(),
            CARD_PLACEHOLDER,
        ),
        // Ghana Card format: GHA-XXXXXXXXX-X.
        (Regex::new(r"GHA-\d{9}-\d").unwrap(), ID_PLACEHOLDER),
    ]
});

/// Produce a sanitized copy of free-form text.
///
/// Pure and deterministic; non-matching text is returned unchanged.
#[must_use]
pub fn redact(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, (pattern, placeholder)| {
        pattern.replace_all(&acc, *placeholder).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(redact(""), "");
    }

    #[test]
    fn test_clean_text_unchanged() {
        let text = "The service was quick and the staff were friendly.";
        assert_eq!(redact(text), text);
    }

    #[test]
    fn test_redacts_local_phone() {
        let out = redact("Call me on 0244123456 for details.");
        assert!(out.contains(PHONE_PLACEHOLDER));
        assert!(!out.contains("0244123456"));
    }

    #[test]
    fn test_redacts_international_phone() {
        let out = redact("Reach them at +233244123456 any time.");
        assert!(out.contains(PHONE_PLACEHOLDER));
        assert!(!out.contains("244123456"));
    }

    #[test]
    fn test_redacts_email() {
        let out = redact("Their address is support@example.com apparently.");
        assert_eq!(out, format!("Their address is {EMAIL_PLACEHOLDER} apparently."));
    }

    #[test]
    fn test_redacts_card_number() {
        let out = redact("They charged card 4111 1111 1111 1111 twice.");
        assert!(out.contains(CARD_PLACEHOLDER));
        assert!(!out.contains("4111"));

        let out = redact("Unspaced: 4111111111111111.");
        assert!(out.contains(CARD_PLACEHOLDER));
    }

    #[test]
    fn test_redacts_national_id() {
        let out = redact("ID shown was GHA-123456789-0 at the desk.");
        assert_eq!(out, format!("ID shown was {ID_PLACEHOLDER} at the desk."));
    }

    #[test]
    fn test_multiple_categories_all_redacted() {
        let out = redact("Contact 0244123456 or fraud@scam.com, card GHA-123456789-0.");
        assert!(out.contains(PHONE_PLACEHOLDER));
        assert!(out.contains(EMAIL_PLACEHOLDER));
        assert!(out.contains(ID_PLACEHOLDER));
    }

    #[test]
    fn test_idempotent() {
        let texts = [
            "Call 0244123456 now",
            "Mail a@b.co or pay 1234 5678 9012 3456",
            "GHA-987654321-1",
            "nothing sensitive here",
        ];
        for text in texts {
            let once = redact(text);
            assert_eq!(redact(&once), once);
        }
    }
}
