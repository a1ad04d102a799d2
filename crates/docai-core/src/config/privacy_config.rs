use serde::{Deserialize, Serialize};

use super::defaults;

/// How pattern matches are mapped back to offsets in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternOffsets {
    /// Every match of a value points at the value's first occurrence.
    #[default]
    FirstOccurrence,
    /// Each match keeps the offsets where the regex found it.
    MatchPosition,
}

/// How the redactor treats spans that overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Apply every span as given; overlaps may leave adjacent tokens.
    #[default]
    Preserve,
    /// Union overlapping spans before applying them.
    Merge,
}

/// Privacy subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Run the learned sequence-labeling model alongside the patterns.
    pub ner_enabled: bool,
    /// Directory holding the token-classification model.
    pub model_path: String,
    /// Entity labels that are redacted. Everything else is left alone.
    pub sensitive_labels: Vec<String>,
    /// Token spliced in place of each redacted span.
    pub replacement_token: String,
    pub pattern_offsets: PatternOffsets,
    pub overlap_policy: OverlapPolicy,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            ner_enabled: defaults::DEFAULT_NER_ENABLED,
            model_path: defaults::DEFAULT_NER_MODEL_PATH.to_string(),
            sensitive_labels: defaults::DEFAULT_SENSITIVE_LABELS
                .iter()
                .map(|l| l.to_string())
                .collect(),
            replacement_token: defaults::DEFAULT_REPLACEMENT_TOKEN.to_string(),
            pattern_offsets: PatternOffsets::default(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}
