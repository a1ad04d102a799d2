use crate::errors::DocaiResult;
use crate::models::LabeledToken;

/// Learned token-classification model.
///
/// Returns one entry per labeled token with byte offsets into `text`.
pub trait ISequenceLabeler: Send + Sync {
    fn label(&self, text: &str) -> DocaiResult<Vec<LabeledToken>>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}
