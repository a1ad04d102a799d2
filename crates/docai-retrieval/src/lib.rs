//! # docai-retrieval
//!
//! Turns a user question into at most `k` index results, preferring the
//! document the question names.
//!
//! ```text
//! RetrievalEngine (IRetriever)
//! ├── query::normalize      lower-case, strip trailing qualifiers
//! ├── targeting::find_target base-name containment, then exact filename
//! ├── IVectorIndex          filtered query + shortfall backfill
//! └── dedup                 exact-content dedup, truncate to k
//! ```

pub mod dedup;
pub mod engine;
pub mod query;
pub mod registry;
pub mod targeting;

pub use engine::RetrievalEngine;
pub use registry::{DirectoryRegistry, StaticRegistry};
pub use targeting::{MatchKind, Target};
