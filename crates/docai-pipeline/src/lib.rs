//! # docai-pipeline
//!
//! Wires retrieval, redaction and generation into a conversational
//! question-answering pass.
//!
//! ```text
//! QaPipeline::ask
//! ├── IRetriever        top-k context (failure → no context)
//! ├── ISanitizer        redact each context chunk, then the answer
//! ├── prompt::compose   preamble + history + context + question
//! ├── IGenerativeModel  GeminiClient (failure → fallback answer)
//! └── ConversationBuffer
//! ```

pub mod conversation;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod sources;

pub use conversation::{ConversationBuffer, Role, Turn};
pub use gemini::GeminiClient;
pub use pipeline::{Answer, AnswerStatus, QaPipeline};
pub use sources::{format_sources, preview};
