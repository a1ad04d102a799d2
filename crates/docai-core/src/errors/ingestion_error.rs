/// Ingestion flow errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unsupported document format: {file_name}")]
    UnsupportedFormat { file_name: String },

    #[error("document has no usable content: {file_name}")]
    EmptyDocument { file_name: String },

    #[error("index write failed for {file_name}: {reason}")]
    IndexWriteFailed { file_name: String, reason: String },
}
