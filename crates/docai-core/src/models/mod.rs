mod chunk;
mod degradation_event;
mod document;
mod entity;
mod generation;
mod retrieval;

pub use chunk::{Chunk, ChunkLocation, ChunkMetadata, ChunkRecord};
pub use degradation_event::DegradationEvent;
pub use document::DocumentReference;
pub use entity::{EntityLabel, EntitySpan, LabeledToken, SpanSource};
pub use generation::GenerationParams;
pub use retrieval::{FilterOp, MetadataFilter, RetrievedDocument};
