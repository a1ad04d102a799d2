use docai_core::config::{OverlapPolicy, PrivacyConfig};
use docai_core::models::{EntityLabel, EntitySpan, SpanSource};
use docai_core::traits::ISanitizer;
use docai_privacy::{PrivacyEngine, Redactor};
use proptest::prelude::*;

fn engine() -> PrivacyEngine {
    PrivacyEngine::pattern_only(&PrivacyConfig::default())
}

fn filler() -> impl Strategy<Value = String> {
    "[一-龥a-z ，。]{0,12}"
}

// ── Redacted output never contains the raw sensitive value ────────────────

proptest! {
    #[test]
    fn redacted_mobile_number_never_survives(
        prefix in filler(),
        digits in "[0-9]{8}",
        suffix in filler(),
    ) {
        let phone = format!("09{}-{}-{}", &digits[..2], &digits[2..5], &digits[5..]);
        let input = format!("{prefix}{phone}{suffix}");
        let result = engine().sanitize(&input).unwrap();
        prop_assert!(!result.text.contains(&phone), "phone survived: {}", result.text);
    }

    #[test]
    fn redacted_email_never_survives(
        user in "[a-z]{3,8}",
        domain in "[a-z]{3,8}",
        prefix in filler(),
    ) {
        let email = format!("{user}@{domain}.com");
        let input = format!("{prefix} {email}");
        let result = engine().sanitize(&input).unwrap();
        prop_assert!(!result.text.contains(&email), "email survived: {}", result.text);
    }
}

// ── Detection on redacted text finds none of the original values ──────────

proptest! {
    #[test]
    fn redaction_is_idempotent_on_detection(
        user in "[a-z]{3,8}",
        digits in "[0-9]{8}",
        filler in filler(),
    ) {
        let input = format!("{filler}{user}@mail.com {filler} 09{digits}");
        let engine = engine();
        let first = engine.detect(&input);
        let redacted = engine.sanitize(&input).unwrap();
        let second = engine.detect(&redacted.text);

        let originals: Vec<&str> = first.spans.iter().filter_map(|s| s.slice(&input)).collect();
        for span in &second.spans {
            let value = span.slice(&redacted.text).unwrap();
            prop_assert!(!originals.contains(&value), "re-detected {}", value);
        }
        let again = engine.sanitize(&redacted.text).unwrap();
        prop_assert_eq!(&again.text, &redacted.text);
    }
}

// ── Non-overlapping spans: text outside the spans is untouched ────────────

proptest! {
    #[test]
    fn non_overlapping_spans_keep_surrounding_text(
        parts in prop::collection::vec(("[一-龥a-z]{1,6}", "[一-龥a-z]{1,6}"), 1..6),
    ) {
        let mut text = String::new();
        let mut spans = Vec::new();
        let mut kept = Vec::new();
        for (plain, secret) in &parts {
            text.push_str(plain);
            kept.push(plain.clone());
            let start = text.len();
            text.push_str(secret);
            spans.push(EntitySpan::new(EntityLabel::Person, start, text.len(), 0.9, SpanSource::Model));
        }
        let redactor = Redactor::new(["PERSON"].map(String::from), "[REDACTED]", OverlapPolicy::Preserve);
        let out = redactor.redact(&text, &spans).unwrap();

        let expected: String = kept.iter().map(|p| format!("{p}[REDACTED]")).collect();
        prop_assert_eq!(out, expected);
    }
}
