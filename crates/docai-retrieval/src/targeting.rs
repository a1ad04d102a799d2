//! Picks the document a query is about, if any.

use docai_core::models::DocumentReference;
use serde::{Deserialize, Serialize};

/// How the target document was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The query contains the file name without its extension.
    BaseName,
    /// The query is the full file name.
    FullName,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseName => "base_name",
            Self::FullName => "full_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub file_name: String,
    pub matched_by: MatchKind,
}

/// Find the targeted document for an already normalized query.
///
/// Base-name containment is tried first over the whole registry, in
/// registry order, so the first listed match wins even when a later name
/// is a longer match. An exact full-filename comparison is the fallback.
pub fn find_target(normalized_query: &str, documents: &[String]) -> Option<Target> {
    if normalized_query.is_empty() {
        return None;
    }
    let references: Vec<DocumentReference> = documents
        .iter()
        .map(|d| DocumentReference::from_file_name(d.as_str()))
        .collect();

    references
        .iter()
        .find(|r| r.mentioned_in(normalized_query))
        .map(|r| Target {
            file_name: r.file_name.clone(),
            matched_by: MatchKind::BaseName,
        })
        .or_else(|| {
            references
                .iter()
                .find(|r| r.is_exactly(normalized_query))
                .map(|r| Target {
                    file_name: r.file_name.clone(),
                    matched_by: MatchKind::FullName,
                })
        })
}
