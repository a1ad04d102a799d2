use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of documents returned per query.
    pub top_k: usize,
    /// Multiplier applied to `top_k` when querying a targeted document.
    pub target_overfetch: usize,
    /// Trailing phrases removed from a query before document targeting.
    pub summary_qualifiers: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            target_overfetch: defaults::DEFAULT_TARGET_OVERFETCH,
            summary_qualifiers: defaults::DEFAULT_SUMMARY_QUALIFIERS
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}
