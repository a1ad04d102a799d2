mod collaborator_error;
mod docai_error;
mod ingestion_error;
mod model_error;
mod retrieval_error;

pub use collaborator_error::CollaboratorError;
pub use docai_error::{DocaiError, DocaiResult};
pub use ingestion_error::IngestionError;
pub use model_error::ModelError;
pub use retrieval_error::RetrievalError;
