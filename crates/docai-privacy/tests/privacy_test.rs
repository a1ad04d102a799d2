use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use docai_core::config::{OverlapPolicy, PatternOffsets, PrivacyConfig};
use docai_core::errors::{DocaiResult, ModelError};
use docai_core::models::{EntityLabel, LabeledToken, SpanSource};
use docai_core::traits::{ISanitizer, ISequenceLabeler};
use docai_observability::degradation::RecoveryStatus;
use docai_privacy::{DetectionMode, PrivacyEngine};

/// Labels every occurrence of fixed substrings, one token per character.
struct DictionaryLabeler {
    entries: Vec<(&'static str, &'static str)>,
}

impl ISequenceLabeler for DictionaryLabeler {
    fn label(&self, text: &str) -> DocaiResult<Vec<LabeledToken>> {
        let mut tokens = Vec::new();
        for (needle, entity) in &self.entries {
            for (pos, _) in text.match_indices(needle) {
                for (i, (offset, c)) in needle.char_indices().enumerate() {
                    let tag = if i == 0 { "B" } else { "I" };
                    let start = pos + offset;
                    tokens.push(LabeledToken::new(
                        format!("{tag}-{entity}"),
                        start,
                        start + c.len_utf8(),
                        0.9,
                    ));
                }
            }
        }
        tokens.sort_by_key(|t| t.start);
        Ok(tokens)
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

struct FailingLabeler;

impl ISequenceLabeler for FailingLabeler {
    fn label(&self, _: &str) -> DocaiResult<Vec<LabeledToken>> {
        Err(ModelError::InferenceFailed {
            reason: "out of memory".into(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Fails while `down` is set, otherwise labels nothing.
struct SwitchableLabeler {
    down: Arc<AtomicBool>,
}

impl ISequenceLabeler for SwitchableLabeler {
    fn label(&self, _: &str) -> DocaiResult<Vec<LabeledToken>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ModelError::InferenceFailed {
                reason: "session lost".into(),
            }
            .into());
        }
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "switchable"
    }
}

fn dictionary_engine() -> PrivacyEngine {
    let labeler = DictionaryLabeler {
        entries: vec![("凱基證券", "ORG"), ("許大明", "PERSON"), ("無神教", "NORP"), ("台北", "GPE")],
    };
    PrivacyEngine::with_labeler(&PrivacyConfig::default(), Arc::new(labeler))
}

// ── Phone scenario ────────────────────────────────────────────────────────

#[test]
fn phone_is_detected_once_and_redacted() {
    let engine = PrivacyEngine::pattern_only(&PrivacyConfig::default());
    let detection = engine.detect("電話：0912-345-678");
    assert_eq!(detection.spans.len(), 1);
    assert_eq!(detection.spans[0].label, EntityLabel::Phone);
    assert_eq!(detection.spans[0].source, SpanSource::Pattern);
    assert!((detection.spans[0].confidence - 0.95).abs() < f64::EPSILON);

    let result = engine.sanitize("電話：0912-345-678").unwrap();
    assert_eq!(result.text, "電話：[REDACTED]");
    assert_eq!(result.redactions.len(), 1);
}

#[test]
fn model_and_pattern_entities_are_all_redacted() {
    let text = "凱基證券(phone：0223148800)資訊部資料科學家許大明，他的email是example@gmail.com。他是個無神教";
    let result = dictionary_engine().sanitize(text).unwrap();
    assert_eq!(
        result.text,
        "[REDACTED](phone：[REDACTED])資訊部資料科學家[REDACTED]，他的email是[REDACTED]。他是個[REDACTED]"
    );
    assert!(!result.degraded);
}

#[test]
fn non_sensitive_labels_are_kept() {
    let result = dictionary_engine().sanitize("許大明住在台北").unwrap();
    assert_eq!(result.text, "[REDACTED]住在台北");
}

#[test]
fn sensitive_label_set_is_configurable() {
    let config = PrivacyConfig {
        sensitive_labels: vec!["EMAIL".into()],
        ..Default::default()
    };
    let engine = PrivacyEngine::pattern_only(&config);
    let result = engine.sanitize("0912-345-678 a@b.com").unwrap();
    assert_eq!(result.text, "0912-345-678 [REDACTED]");
}

#[test]
fn custom_replacement_token() {
    let config = PrivacyConfig {
        replacement_token: "＊＊＊".into(),
        ..Default::default()
    };
    let engine = PrivacyEngine::pattern_only(&config);
    assert_eq!(engine.sanitize("a@b.com").unwrap().text, "＊＊＊");
}

// ── Degradation ───────────────────────────────────────────────────────────

#[test]
fn missing_model_degrades_to_pattern_only() {
    let config = PrivacyConfig {
        model_path: "/definitely/not/a/model".into(),
        ..Default::default()
    };
    let engine = PrivacyEngine::new(&config);
    assert!(!engine.detector().has_model());

    let result = engine.sanitize("mail me: someone@example.org").unwrap();
    assert!(result.degraded);
    assert_eq!(result.text, "mail me: [REDACTED]");
    assert!(!engine.degradation_events().is_empty());
}

#[test]
fn disabled_ner_is_pattern_only() {
    let config = PrivacyConfig {
        ner_enabled: false,
        ..Default::default()
    };
    let engine = PrivacyEngine::new(&config);
    match engine.detect("x").mode {
        DetectionMode::PatternOnly { reason } => assert!(reason.contains("disabled")),
        DetectionMode::Full => panic!("expected pattern-only"),
    }
}

#[test]
fn runtime_labeler_failure_is_recorded_and_not_raised() {
    let engine = PrivacyEngine::with_labeler(&PrivacyConfig::default(), Arc::new(FailingLabeler));
    assert!(engine.degradation_events().is_empty());

    let result = engine.sanitize("0912-345-678").unwrap();
    assert!(result.degraded);
    assert_eq!(result.text, "[REDACTED]");

    let events = engine.degradation_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].event.failure.contains("out of memory"));
}

#[test]
fn persistent_labeler_failure_is_recorded_once() {
    let engine = PrivacyEngine::with_labeler(&PrivacyConfig::default(), Arc::new(FailingLabeler));
    for _ in 0..10_000 {
        assert!(engine.sanitize("hi").unwrap().degraded);
    }
    let events = engine.degradation_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recovery_status, RecoveryStatus::Active);
}

#[test]
fn labeler_recovery_closes_the_degradation() {
    let down = Arc::new(AtomicBool::new(true));
    let engine = PrivacyEngine::with_labeler(
        &PrivacyConfig::default(),
        Arc::new(SwitchableLabeler { down: down.clone() }),
    );

    assert!(engine.sanitize("a").unwrap().degraded);
    assert!(engine.sanitize("b").unwrap().degraded);
    down.store(false, Ordering::SeqCst);
    assert!(!engine.sanitize("c").unwrap().degraded);
    assert!(!engine.sanitize("d").unwrap().degraded);

    let events = engine.degradation_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recovery_status, RecoveryStatus::Recovered);
    assert!(events[0].recovered_at.is_some());

    down.store(true, Ordering::SeqCst);
    assert!(engine.sanitize("e").unwrap().degraded);
    let events = engine.degradation_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].recovery_status, RecoveryStatus::Active);
}

#[test]
fn redaction_span_records_length_not_text() {
    let engine = PrivacyEngine::pattern_only(&PrivacyConfig::default());
    let text = "電話：0912-345-678";
    let logs = test_fixtures::capture_logs(|| {
        engine.sanitize(text).unwrap();
    });
    assert!(logs.contains(r#""name":"docai.redaction""#), "{logs}");
    assert!(logs.contains(&format!(r#""text_len":{}"#, text.len())));
    assert!(!logs.contains("0912-345-678"));
}

// ── Offsets ───────────────────────────────────────────────────────────────

#[test]
fn repeated_value_with_first_occurrence_offsets_still_redacts_first() {
    let engine = PrivacyEngine::pattern_only(&PrivacyConfig::default());
    let result = engine.sanitize("a@b.co, a@b.co").unwrap();
    // Both matches point at the first occurrence; the second copy survives.
    assert_eq!(result.text, "[REDACTED], a@b.co");
}

#[test]
fn match_position_offsets_redact_every_copy() {
    let config = PrivacyConfig {
        pattern_offsets: PatternOffsets::MatchPosition,
        ..Default::default()
    };
    let engine = PrivacyEngine::pattern_only(&config);
    let result = engine.sanitize("a@b.co, a@b.co").unwrap();
    assert_eq!(result.text, "[REDACTED], [REDACTED]");
}

#[test]
fn merge_policy_collapses_overlapping_model_and_pattern_spans() {
    let labeler = DictionaryLabeler {
        entries: vec![("0912", "ORG")],
    };
    let config = PrivacyConfig {
        overlap_policy: OverlapPolicy::Merge,
        ..Default::default()
    };
    let engine = PrivacyEngine::with_labeler(&config, Arc::new(labeler));
    assert_eq!(engine.sanitize("0912-345-678").unwrap().text, "[REDACTED]");

    let preserve = PrivacyEngine::with_labeler(
        &PrivacyConfig::default(),
        Arc::new(DictionaryLabeler {
            entries: vec![("0912", "ORG")],
        }),
    );
    assert_eq!(
        preserve.sanitize("0912-345-678").unwrap().text,
        "[REDACTED][REDACTED]"
    );
}
