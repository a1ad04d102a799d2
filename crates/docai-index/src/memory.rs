use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use docai_core::config::IndexConfig;
use docai_core::errors::{DocaiResult, RetrievalError};
use docai_core::models::{ChunkMetadata, ChunkRecord, MetadataFilter, RetrievedDocument};
use docai_core::traits::{IEmbeddingProvider, IVectorIndex};
use tracing::debug;

use crate::cache::EmbeddingCache;
use crate::embedder::HashedTfIdfEmbedder;

/// Metadata fields a filter may name.
const FILTERABLE_FIELDS: [&str; 5] = ["file_name", "source", "page_num", "paragraph", "chunk_id"];

struct StoredRecord {
    id: String,
    content: String,
    metadata: ChunkMetadata,
    embedding: Vec<f32>,
}

/// Vector index held in process memory.
///
/// Records keep their first insertion position; adding an existing id
/// replaces the record in place. Queries rank by cosine similarity with
/// insertion order breaking ties, so results are deterministic.
pub struct MemoryVectorIndex {
    embedder: Arc<dyn IEmbeddingProvider>,
    cache: EmbeddingCache,
    records: RwLock<Vec<StoredRecord>>,
}

impl MemoryVectorIndex {
    pub fn new(embedder: Arc<dyn IEmbeddingProvider>, cache_capacity: u64) -> Self {
        Self {
            embedder,
            cache: EmbeddingCache::new(cache_capacity),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Index backed by the hashed TF-IDF embedder.
    pub fn from_config(config: &IndexConfig) -> DocaiResult<Self> {
        let embedder = HashedTfIdfEmbedder::new(config.dimensions)?;
        Ok(Self::new(Arc::new(embedder), config.embedding_cache_size))
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Drop every record, for wholesale re-ingestion.
    pub fn clear(&self) -> DocaiResult<()> {
        let mut records = self.records.write().map_err(|e| poisoned(&e))?;
        records.clear();
        Ok(())
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> DocaiResult<Vec<String>> {
        let records = self.records.read().map_err(|e| poisoned(&e))?;
        Ok(records.iter().map(|r| r.id.clone()).collect())
    }

    fn embed_cached(&self, content_hash: &str, text: &str) -> DocaiResult<Vec<f32>> {
        self.cache
            .get_or_try_insert(content_hash, || self.embedder.embed(text))
    }
}

fn poisoned<T>(e: &std::sync::PoisonError<T>) -> RetrievalError {
    RetrievalError::IndexUnavailable {
        reason: format!("record lock poisoned: {e}"),
    }
}

fn check_filter(filter: &MetadataFilter) -> DocaiResult<()> {
    if FILTERABLE_FIELDS.contains(&filter.field.as_str()) {
        Ok(())
    } else {
        Err(RetrievalError::FilterRejected {
            filter: filter.to_string(),
            reason: format!("unknown metadata field {:?}", filter.field),
        }
        .into())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na <= f32::EPSILON || nb <= f32::EPSILON {
        0.0
    } else {
        dot / (na * nb)
    }
}

impl IVectorIndex for MemoryVectorIndex {
    fn query(
        &self,
        text: &str,
        n: usize,
        filter: Option<&MetadataFilter>,
    ) -> DocaiResult<Vec<RetrievedDocument>> {
        if let Some(f) = filter {
            check_filter(f)?;
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let query = self.embed_cached(&EmbeddingCache::key_for(text), text)?;
        let records = self.records.read().map_err(|e| poisoned(&e))?;

        let mut scored: Vec<(f32, &StoredRecord)> = records
            .iter()
            .filter(|r| filter.map_or(true, |f| f.matches(&r.metadata)))
            .map(|r| (cosine(&query, &r.embedding), r))
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(n);

        debug!(
            candidates = records.len(),
            returned = scored.len(),
            filtered = filter.is_some(),
            "memory index query"
        );
        Ok(scored
            .into_iter()
            .map(|(_, r)| RetrievedDocument::new(r.content.clone(), r.metadata.clone()))
            .collect())
    }

    fn add(&self, batch: &[ChunkRecord]) -> DocaiResult<usize> {
        let mut embedded = Vec::with_capacity(batch.len());
        for record in batch {
            let hash = if record.content_hash.is_empty() {
                EmbeddingCache::key_for(&record.content)
            } else {
                record.content_hash.clone()
            };
            embedded.push(StoredRecord {
                id: record.id.clone(),
                content: record.content.clone(),
                metadata: record.metadata.clone(),
                embedding: self.embed_cached(&hash, &record.content)?,
            });
        }

        let mut records = self.records.write().map_err(|e| poisoned(&e))?;
        for record in embedded {
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        Ok(batch.len())
    }

    fn count(&self) -> DocaiResult<usize> {
        Ok(self.records.read().map_err(|e| poisoned(&e))?.len())
    }
}
