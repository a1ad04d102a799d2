use crate::errors::DocaiResult;

/// Inventory of documents currently in the pool.
///
/// Consulted on every retrieval call so renamed, added, or removed files
/// take effect without a restart.
pub trait IDocumentRegistry: Send + Sync {
    /// File names in a stable, deterministic order.
    fn list_documents(&self) -> DocaiResult<Vec<String>>;
}
