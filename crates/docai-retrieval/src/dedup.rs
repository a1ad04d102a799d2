//! Exact-content deduplication of result sets.

use std::collections::HashSet;

use docai_core::models::RetrievedDocument;

/// Drop results whose content already appeared earlier. First occurrence wins,
/// so the input's ranking is preserved.
pub fn by_content(results: Vec<RetrievedDocument>) -> Vec<RetrievedDocument> {
    let mut seen: HashSet<String> = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.content.clone()))
        .collect()
}
