//! In-memory embedding cache using moka.
//!
//! TinyLFU admission, size-bounded eviction, idle and absolute TTLs.

use std::time::Duration;

use moka::sync::Cache;

/// Embedding cache keyed by blake3 content hashes.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a cache holding at most `max_entries` embeddings.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();

        Self { cache }
    }

    /// blake3 hex digest used as the cache key for `text`.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, content_hash: &str) -> Option<Vec<f32>> {
        self.cache.get(content_hash)
    }

    pub fn insert(&self, content_hash: String, embedding: Vec<f32>) {
        self.cache.insert(content_hash, embedding);
    }

    /// Return the cached embedding, computing and storing it on a miss.
    pub fn get_or_try_insert<E>(
        &self,
        content_hash: &str,
        compute: impl FnOnce() -> Result<Vec<f32>, E>,
    ) -> Result<Vec<f32>, E> {
        if let Some(hit) = self.get(content_hash) {
            return Ok(hit);
        }
        let embedding = compute()?;
        self.insert(content_hash.to_string(), embedding.clone());
        Ok(embedding)
    }

    /// Number of entries currently in the cache. May lag behind recent writes.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
