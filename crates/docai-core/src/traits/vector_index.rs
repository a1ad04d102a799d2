use crate::errors::DocaiResult;
use crate::models::{ChunkRecord, MetadataFilter, RetrievedDocument};

/// Similarity-searchable store of chunk records.
///
/// The core never assumes a storage engine; any index honoring this
/// contract (including equality and not-equality filtering on `file_name`)
/// can back retrieval.
pub trait IVectorIndex: Send + Sync {
    /// Up to `n` records most similar to `text`, best first, restricted by `filter`.
    fn query(
        &self,
        text: &str,
        n: usize,
        filter: Option<&MetadataFilter>,
    ) -> DocaiResult<Vec<RetrievedDocument>>;

    /// Insert or replace records, returning how many were written.
    fn add(&self, records: &[ChunkRecord]) -> DocaiResult<usize>;

    /// Number of stored records.
    fn count(&self) -> DocaiResult<usize>;
}
