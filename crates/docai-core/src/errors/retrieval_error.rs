/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("vector index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("filter rejected: {filter}: {reason}")]
    FilterRejected { filter: String, reason: String },

    #[error("query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("document registry unavailable: {path}: {reason}")]
    RegistryUnavailable { path: String, reason: String },
}
