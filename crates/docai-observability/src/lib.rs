//! # docai-observability
//!
//! Structured tracing for the docai pipeline: subscriber setup, span
//! definitions, key-operation log events, and degradation tracking.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
