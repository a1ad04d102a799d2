use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::SUPPORTED_EXTENSIONS;

/// Ingestion subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Target chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Prefix stored chunk content with a file-name header.
    pub content_header: bool,
    /// Directory holding the document pool.
    pub document_dir: String,
    /// Accepted file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::DEFAULT_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_CHUNK_OVERLAP,
            content_header: defaults::DEFAULT_CONTENT_HEADER,
            document_dir: defaults::DEFAULT_DOCUMENT_DIR.to_string(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}
