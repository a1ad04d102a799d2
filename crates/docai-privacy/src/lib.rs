//! # docai-privacy
//!
//! Sensitive-entity redaction guardrail.
//! A learned sequence labeler and regex patterns feed one detector; the
//! redactor rewrites text back to front so offsets never drift.

pub mod aggregation;
pub mod detector;
pub mod engine;
#[cfg(feature = "onnx-ner")]
pub mod onnx;
pub mod patterns;
pub mod redactor;
pub mod windowing;

pub use detector::{Detection, DetectionMode, EntityDetector};
pub use engine::PrivacyEngine;
pub use redactor::Redactor;
