use serde::{Deserialize, Serialize};

use super::defaults;

/// Reference vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Embedding dimensions produced by the hashed TF-IDF embedder.
    pub dimensions: usize,
    /// Max entries in the content-hash embedding cache.
    pub embedding_cache_size: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            embedding_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
