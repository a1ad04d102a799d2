//! Span definitions per operation: ingestion, redaction, retrieval, generation.

/// Create an ingestion span.
#[macro_export]
macro_rules! ingestion_span {
    ($file_name:expr) => {
        tracing::info_span!("docai.ingestion", file_name = %$file_name)
    };
}

/// Create a redaction span.
#[macro_export]
macro_rules! redaction_span {
    ($text_len:expr) => {
        tracing::debug_span!("docai.redaction", text_len = $text_len)
    };
}

/// Create a retrieval span. Carries the question's length only; the
/// question itself may hold unredacted personal data.
#[macro_export]
macro_rules! retrieval_span {
    ($query_chars:expr, $k:expr) => {
        tracing::info_span!("docai.retrieval", query_chars = $query_chars, k = $k)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($model:expr) => {
        tracing::info_span!("docai.generation", model = %$model)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGESTION: &str = "docai.ingestion";
    pub const REDACTION: &str = "docai.redaction";
    pub const RETRIEVAL: &str = "docai.retrieval";
    pub const GENERATION: &str = "docai.generation";
}
