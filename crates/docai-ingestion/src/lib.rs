//! # docai-ingestion
//!
//! Turns extracted document text into chunk records.
//! The chunker is a pure function; the engine writes records to any `IVectorIndex`.

pub mod chunker;
pub mod document;
pub mod engine;
pub mod records;

pub use chunker::split;
pub use document::{document_kind, DocumentKind, ExtractedDocument, Segment};
pub use engine::{IngestionEngine, IngestionReport};
