/// Sequence-labeling model errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model load failed: {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("model unavailable: {model}")]
    Unavailable { model: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },
}
