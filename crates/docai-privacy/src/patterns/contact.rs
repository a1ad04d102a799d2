use docai_core::models::EntityLabel;
use regex::Regex;
use std::sync::LazyLock;

/// A compiled contact-detail pattern.
pub struct ContactPattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub base_confidence: f64,
}

impl ContactPattern {
    pub fn label(&self) -> EntityLabel {
        match self.name {
            "email" => EntityLabel::Email,
            _ => EntityLabel::Phone,
        }
    }
}

macro_rules! contact_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Taiwanese phone numbers ────────────────────────────────────────────────
// Mobile with optional +886 / 0 prefix, landline with area code, and the
// dashed 2+7/8 and 4+7 forms.
contact_pattern!(
    RE_PHONE,
    r"(?:\+?886-?|0)?9\d{2}-?\d{3}-?\d{3}|(?:\+?886-?|0)?\d{2}-?\d{4}-?\d{4}|\d{2}-\d{7,8}|\d{4}-\d{7}"
);

// ── Email ──────────────────────────────────────────────────────────────────
contact_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

pub const PHONE_CONFIDENCE: f64 = 0.95;
pub const EMAIL_CONFIDENCE: f64 = 0.99;

/// Patterns in detection order: phones before emails.
pub fn all_patterns() -> Vec<ContactPattern> {
    vec![
        ContactPattern {
            name: "phone",
            regex: &RE_PHONE,
            base_confidence: PHONE_CONFIDENCE,
        },
        ContactPattern {
            name: "email",
            regex: &RE_EMAIL,
            base_confidence: EMAIL_CONFIDENCE,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_matches(text: &str) -> Vec<&str> {
        RE_PHONE
            .as_ref()
            .unwrap()
            .find_iter(text)
            .map(|m| m.as_str())
            .collect()
    }

    #[test]
    fn mobile_formats() {
        assert_eq!(phone_matches("0912-345-678"), vec!["0912-345-678"]);
        assert_eq!(phone_matches("0912345678"), vec!["0912345678"]);
        assert_eq!(phone_matches("+886912345678"), vec!["+886912345678"]);
        assert_eq!(phone_matches("+886-912-345-678"), vec!["+886-912-345-678"]);
    }

    #[test]
    fn landline_formats() {
        assert_eq!(phone_matches("phone：0223148800"), vec!["0223148800"]);
        assert_eq!(phone_matches("02-2314-8800"), vec!["02-2314-8800"]);
        assert_eq!(phone_matches("07-1234567"), vec!["07-1234567"]);
    }

    #[test]
    fn email_matches_whole_address() {
        let re = RE_EMAIL.as_ref().unwrap();
        let m = re.find("他的email是example@gmail.com。").unwrap();
        assert_eq!(m.as_str(), "example@gmail.com");
    }

    #[test]
    fn replacement_token_matches_no_pattern() {
        for pat in all_patterns() {
            assert!(!pat.regex.as_ref().unwrap().is_match("[REDACTED]"));
        }
    }
}
