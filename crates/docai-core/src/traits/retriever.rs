use crate::errors::DocaiResult;
use crate::models::RetrievedDocument;

/// Query-to-documents retrieval.
pub trait IRetriever: Send + Sync {
    /// Return at most `k` documents relevant to `query`, best first.
    fn retrieve(&self, query: &str, k: usize) -> DocaiResult<Vec<RetrievedDocument>>;
}
