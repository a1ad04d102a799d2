use super::{CollaboratorError, IngestionError, ModelError, RetrievalError};

/// Convenience alias used by every fallible operation in the workspace.
pub type DocaiResult<T> = Result<T, DocaiError>;

/// Top-level error for the docai pipeline.
///
/// Pure functions (chunking, redaction) only ever produce `InvalidInput`.
/// Collaborator failures arrive wrapped in their subsystem error and are
/// expected to be converted into a degraded result at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum DocaiError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("model error: {0}")]
    ModelError(#[from] ModelError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("collaborator error: {0}")]
    CollaboratorError(#[from] CollaboratorError),

    #[error("ingestion error: {0}")]
    IngestionError(#[from] IngestionError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DocaiError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether this error came from an external collaborator (index, model,
    /// generative API) rather than from a programming error.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::ModelError(_) | Self::RetrievalError(_) | Self::CollaboratorError(_)
        )
    }
}

impl From<toml::de::Error> for DocaiError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            reason: err.to_string(),
        }
    }
}
