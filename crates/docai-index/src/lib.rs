//! # docai-index
//!
//! A runnable stand-in for an external vector store: an `IVectorIndex`
//! held in memory, embedding with a hashed TF-IDF provider that needs no
//! model files.

pub mod cache;
pub mod embedder;
pub mod memory;

pub use cache::EmbeddingCache;
pub use embedder::HashedTfIdfEmbedder;
pub use memory::MemoryVectorIndex;
