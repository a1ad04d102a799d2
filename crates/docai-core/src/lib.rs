//! # docai-core
//!
//! Foundation crate for the docai retrieval pipeline.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::DocaiConfig;
pub use errors::{DocaiError, DocaiResult};
pub use models::{
    Chunk, ChunkLocation, ChunkMetadata, ChunkRecord, DocumentReference, EntityLabel, EntitySpan,
    MetadataFilter, RetrievedDocument,
};
