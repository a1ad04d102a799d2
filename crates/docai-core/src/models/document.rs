use std::path::Path;

use serde::{Deserialize, Serialize};

/// A document known to the registry, with the normalized name used for
/// query targeting. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub file_name: String,
    /// File name without its last extension, lower-cased.
    pub base_name: String,
}

impl DocumentReference {
    pub fn from_file_name(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let base_name = Path::new(&file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&file_name)
            .to_lowercase();
        Self {
            file_name,
            base_name,
        }
    }

    /// Whether the (already normalized) query mentions this document's base name.
    pub fn mentioned_in(&self, normalized_query: &str) -> bool {
        !self.base_name.is_empty() && normalized_query.contains(&self.base_name)
    }

    /// Whether the (already normalized) query is exactly this file name.
    pub fn is_exactly(&self, normalized_query: &str) -> bool {
        self.file_name.to_lowercase() == normalized_query
    }
}
