use serde::{Deserialize, Serialize};

use crate::errors::DocaiResult;
use crate::models::EntitySpan;

/// Result of sanitization with metadata about what was redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedText {
    pub text: String,
    /// Spans that were applied, with offsets into the input text.
    pub redactions: Vec<EntitySpan>,
    /// Detection ran without the learned model.
    pub degraded: bool,
}

/// Sensitive-entity redaction.
pub trait ISanitizer: Send + Sync {
    /// Detect sensitive entities in `text` and replace them with placeholders.
    fn sanitize(&self, text: &str) -> DocaiResult<SanitizedText>;
}
