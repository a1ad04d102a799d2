use std::sync::{Arc, Mutex};

use docai_core::config::PrivacyConfig;
use docai_core::errors::DocaiResult;
use docai_core::models::DegradationEvent;
use docai_core::traits::{ISanitizer, ISequenceLabeler, SanitizedText};
use docai_observability::degradation::{DegradationTracker, TrackedDegradation};

use crate::detector::{Detection, DetectionMode, EntityDetector};
use crate::patterns;
use crate::redactor::Redactor;

const COMPONENT: &str = "entity_detector";

/// Privacy engine: detect entities in a string, then redact the sensitive
/// ones in that same string.
///
/// Implements `ISanitizer` from docai-core. Detection failures never reach
/// the caller; they are recorded as degradation events instead.
pub struct PrivacyEngine {
    detector: EntityDetector,
    redactor: Redactor,
    tracker: Mutex<DegradationTracker>,
}

impl PrivacyEngine {
    /// Build from config, loading the sequence labeler when it is enabled.
    pub fn new(config: &PrivacyConfig) -> Self {
        let detector = if config.ner_enabled {
            EntityDetector::from_load_result(load_labeler(config), config.pattern_offsets)
        } else {
            EntityDetector::pattern_only("sequence labeling disabled", config.pattern_offsets)
        };
        Self::with_detector(config, detector)
    }

    /// Build with an already loaded labeler.
    pub fn with_labeler(config: &PrivacyConfig, labeler: Arc<dyn ISequenceLabeler>) -> Self {
        Self::with_detector(config, EntityDetector::new(labeler, config.pattern_offsets))
    }

    /// Build a pattern-only engine.
    pub fn pattern_only(config: &PrivacyConfig) -> Self {
        Self::with_detector(
            config,
            EntityDetector::pattern_only("pattern-only engine", config.pattern_offsets),
        )
    }

    pub fn with_detector(config: &PrivacyConfig, detector: EntityDetector) -> Self {
        let mut tracker = DegradationTracker::new();
        for name in patterns::failed_patterns() {
            tracker.record(DegradationEvent::now(
                format!("pattern:{name}"),
                "regex compilation failed",
                "pattern skipped",
            ));
        }
        if !detector.has_model() {
            tracker.record(DegradationEvent::now(
                COMPONENT,
                "sequence labeler unavailable",
                "pattern_only",
            ));
        }
        Self {
            detector,
            redactor: Redactor::from_config(config),
            tracker: Mutex::new(tracker),
        }
    }

    pub fn detector(&self) -> &EntityDetector {
        &self.detector
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// Detect entities in `text`.
    ///
    /// A runtime labeler failure is recorded once when the detector goes
    /// from healthy to degraded; the next full detection marks it recovered.
    pub fn detect(&self, text: &str) -> Detection {
        let detection = self.detector.detect(text);
        if self.detector.has_model() {
            self.track_runtime_state(&detection.mode);
        }
        detection
    }

    /// Redact `text` using spans detected in that same `text`.
    pub fn sanitize_with_detection(&self, text: &str) -> DocaiResult<(SanitizedText, Detection)> {
        let detection = self.detect(text);
        let redacted = self.redactor.redact(text, &detection.spans)?;
        let redactions = self
            .redactor
            .applicable(&detection.spans)
            .into_iter()
            .cloned()
            .collect();
        Ok((
            SanitizedText {
                text: redacted,
                redactions,
                degraded: detection.is_degraded(),
            },
            detection,
        ))
    }

    /// Snapshot of every degradation recorded so far.
    pub fn degradation_events(&self) -> Vec<TrackedDegradation> {
        match self.tracker.lock() {
            Ok(tracker) => tracker.events().to_vec(),
            Err(poisoned) => poisoned.into_inner().events().to_vec(),
        }
    }

    fn track_runtime_state(&self, mode: &DetectionMode) {
        let mut tracker = match self.tracker.lock() {
            Ok(tracker) => tracker,
            Err(poisoned) => poisoned.into_inner(),
        };
        let degraded = tracker.is_degraded(COMPONENT);
        match mode {
            DetectionMode::PatternOnly { reason } if !degraded => {
                tracker.record(DegradationEvent::now(COMPONENT, reason.clone(), "pattern_only"));
            }
            DetectionMode::Full if degraded => tracker.mark_recovered(COMPONENT),
            _ => {}
        }
    }
}

impl ISanitizer for PrivacyEngine {
    fn sanitize(&self, text: &str) -> DocaiResult<SanitizedText> {
        let (result, _detection) = self.sanitize_with_detection(text)?;
        Ok(result)
    }
}

#[cfg(feature = "onnx-ner")]
fn load_labeler(config: &PrivacyConfig) -> DocaiResult<Arc<dyn ISequenceLabeler>> {
    let classifier = crate::onnx::OnnxTokenClassifier::load(&config.model_path)?;
    Ok(Arc::new(classifier))
}

#[cfg(not(feature = "onnx-ner"))]
fn load_labeler(config: &PrivacyConfig) -> DocaiResult<Arc<dyn ISequenceLabeler>> {
    tracing::warn!(
        model_path = %config.model_path,
        "built without the onnx-ner feature; no sequence labeler available"
    );
    Err(docai_core::errors::ModelError::Unavailable {
        model: config.model_path.clone(),
    }
    .into())
}
