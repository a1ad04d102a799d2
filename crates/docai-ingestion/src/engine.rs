use std::sync::Arc;

use docai_core::config::IngestionConfig;
use docai_core::errors::{DocaiError, DocaiResult, IngestionError};
use docai_core::traits::IVectorIndex;
use docai_observability::tracing_setup::events;
use tracing::{debug, warn};

use crate::document::ExtractedDocument;
use crate::records;

/// Totals of an `ingest_all` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Documents that produced at least one record.
    pub files: usize,
    /// Records written to the index.
    pub chunks: usize,
    /// Documents skipped because they had no usable content.
    pub skipped: Vec<String>,
}

/// Chunks extracted documents and writes the records to a vector index.
pub struct IngestionEngine {
    config: IngestionConfig,
    index: Arc<dyn IVectorIndex>,
}

impl IngestionEngine {
    pub fn new(config: IngestionConfig, index: Arc<dyn IVectorIndex>) -> Self {
        Self { config, index }
    }

    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Ingest one document with a single index write.
    ///
    /// Returns the number of records written. A document with nothing to
    /// chunk is an `EmptyDocument` error and leaves the index untouched.
    pub fn ingest(&self, doc: &ExtractedDocument) -> DocaiResult<usize> {
        let _span = docai_observability::ingestion_span!(doc.file_name).entered();
        let chunks =
            records::chunk_document(doc, self.config.chunk_size, self.config.chunk_overlap)?;
        if chunks.is_empty() {
            return Err(IngestionError::EmptyDocument {
                file_name: doc.file_name.clone(),
            }
            .into());
        }
        debug!(
            file = %doc.file_name,
            segments = doc.segments.len(),
            chunks = chunks.len(),
            "document chunked"
        );

        let batch: Vec<_> = chunks
            .iter()
            .map(|c| records::to_record(c, self.config.content_header))
            .collect();
        let written = self
            .index
            .add(&batch)
            .map_err(|e| IngestionError::IndexWriteFailed {
                file_name: doc.file_name.clone(),
                reason: e.to_string(),
            })?;

        events::document_ingested(&doc.file_name, written);
        Ok(written)
    }

    /// Ingest documents in order. Empty documents are skipped with a warning;
    /// any other failure stops the run.
    pub fn ingest_all<'a, I>(&self, docs: I) -> DocaiResult<IngestionReport>
    where
        I: IntoIterator<Item = &'a ExtractedDocument>,
    {
        let mut report = IngestionReport::default();
        for doc in docs {
            match self.ingest(doc) {
                Ok(written) => {
                    report.files += 1;
                    report.chunks += written;
                }
                Err(DocaiError::IngestionError(IngestionError::EmptyDocument { file_name })) => {
                    warn!(file = %file_name, "document has no usable content, skipping");
                    report.skipped.push(file_name);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }
}
