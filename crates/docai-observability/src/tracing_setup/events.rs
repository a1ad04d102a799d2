//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log that a query was matched to a specific document.
pub fn document_targeted(file_name: &str, matched_by: &str) {
    tracing::debug!(
        event = "document_targeted",
        file_name = %file_name,
        matched_by = %matched_by,
        "query targets document"
    );
}

/// Log a detector falling back to pattern-only detection.
pub fn detector_degraded(model: &str, reason: &str) {
    tracing::warn!(
        event = "detector_degraded",
        model = %model,
        reason = %reason,
        "entity detector degraded to pattern-only"
    );
}

/// Log a completed retrieval.
pub fn retrieval_completed(k: usize, returned: usize, target: Option<&str>) {
    tracing::info!(
        event = "retrieval_completed",
        k = k,
        returned = returned,
        targeted = target.is_some(),
        target = %target.unwrap_or(""),
        "retrieval completed"
    );
}

/// Log a document written to the index.
pub fn document_ingested(file_name: &str, chunks: usize) {
    tracing::info!(
        event = "document_ingested",
        file_name = %file_name,
        chunks = chunks,
        "document ingested"
    );
}

/// Log the generative model failing and the fallback answer being used.
pub fn generation_fallback(model: &str, reason: &str) {
    tracing::warn!(
        event = "generation_fallback",
        model = %model,
        reason = %reason,
        "generation failed, using fallback answer"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
