mod embedding;
mod generator;
mod labeler;
mod registry;
mod retriever;
mod sanitizer;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use generator::IGenerativeModel;
pub use labeler::ISequenceLabeler;
pub use registry::IDocumentRegistry;
pub use retriever::IRetriever;
pub use sanitizer::{ISanitizer, SanitizedText};
pub use vector_index::IVectorIndex;
