use std::sync::Arc;

use docai_core::config::PatternOffsets;
use docai_core::errors::DocaiResult;
use docai_core::models::{EntitySpan, LabeledToken};
use docai_core::traits::ISequenceLabeler;
use docai_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation;
use crate::patterns;

/// Whether the learned model contributed to a detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DetectionMode {
    Full,
    PatternOnly { reason: String },
}

/// Output of one detection pass over a single string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Model spans first, then phone matches, then email matches.
    /// Spans from different sources may overlap.
    pub spans: Vec<EntitySpan>,
    pub mode: DetectionMode,
}

impl Detection {
    pub fn is_degraded(&self) -> bool {
        matches!(self.mode, DetectionMode::PatternOnly { .. })
    }
}

/// Hybrid entity detector: a learned sequence labeler plus regex patterns.
///
/// The labeler is injected at construction. Without one the detector runs
/// pattern-only and says so in every `Detection`.
pub struct EntityDetector {
    labeler: Option<Arc<dyn ISequenceLabeler>>,
    unavailable_reason: Option<String>,
    offsets: PatternOffsets,
}

impl EntityDetector {
    pub fn new(labeler: Arc<dyn ISequenceLabeler>, offsets: PatternOffsets) -> Self {
        Self {
            labeler: Some(labeler),
            unavailable_reason: None,
            offsets,
        }
    }

    /// A detector that never consults a model.
    pub fn pattern_only(reason: impl Into<String>, offsets: PatternOffsets) -> Self {
        Self {
            labeler: None,
            unavailable_reason: Some(reason.into()),
            offsets,
        }
    }

    /// Build from the outcome of loading a labeler. A failed load is logged
    /// once and yields a pattern-only detector.
    pub fn from_load_result(
        loaded: DocaiResult<Arc<dyn ISequenceLabeler>>,
        offsets: PatternOffsets,
    ) -> Self {
        match loaded {
            Ok(labeler) => Self::new(labeler, offsets),
            Err(e) => {
                let reason = e.to_string();
                events::detector_degraded("sequence_labeler", &reason);
                Self::pattern_only(reason, offsets)
            }
        }
    }

    pub fn has_model(&self) -> bool {
        self.labeler.is_some()
    }

    pub fn offsets(&self) -> PatternOffsets {
        self.offsets
    }

    /// Detect entities in `text`. Never fails: a labeler error degrades this
    /// call to pattern-only.
    pub fn detect(&self, text: &str) -> Detection {
        let (mut spans, mode) = match &self.labeler {
            Some(labeler) => match labeler.label(text) {
                Ok(tokens) => (self.model_spans(text, &tokens), DetectionMode::Full),
                Err(e) => {
                    let reason = e.to_string();
                    events::detector_degraded(labeler.name(), &reason);
                    (Vec::new(), DetectionMode::PatternOnly { reason })
                }
            },
            None => (
                Vec::new(),
                DetectionMode::PatternOnly {
                    reason: self
                        .unavailable_reason
                        .clone()
                        .unwrap_or_else(|| "no sequence labeler".to_string()),
                },
            ),
        };

        spans.extend(patterns::detect(text, self.offsets));
        debug!(
            spans = spans.len(),
            degraded = mode != DetectionMode::Full,
            "entities detected"
        );
        Detection { spans, mode }
    }

    fn model_spans(&self, text: &str, tokens: &[LabeledToken]) -> Vec<EntitySpan> {
        aggregation::aggregate(tokens)
            .into_iter()
            .filter(|span| {
                let valid = span.slice(text).is_some();
                if !valid {
                    debug!(
                        start = span.start,
                        end = span.end,
                        "dropping model span with invalid offsets"
                    );
                }
                valid
            })
            .collect()
    }
}
