use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::constants::FILE_NAME_FIELD;

/// Where in its source document a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "number", rename_all = "snake_case")]
pub enum ChunkLocation {
    /// 1-based PDF page number.
    Page(u32),
    /// 1-based DOCX paragraph number.
    Paragraph(u32),
}

/// A bounded contiguous slice of a document's text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source_file: String,
    pub location: Option<ChunkLocation>,
    /// Position of this chunk within its page or paragraph.
    pub sequence_index: usize,
}

/// Metadata stored alongside each chunk in the vector index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<usize>,
}

impl ChunkMetadata {
    /// Metadata for a whole file with no location information.
    pub fn for_file(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            source: file_name.clone(),
            file_name,
            ..Default::default()
        }
    }

    /// Metadata describing a single chunk.
    pub fn for_chunk(chunk: &Chunk) -> Self {
        let mut meta = Self::for_file(chunk.source_file.clone());
        match chunk.location {
            Some(ChunkLocation::Page(n)) => meta.page_num = Some(n),
            Some(ChunkLocation::Paragraph(n)) => meta.paragraph = Some(n),
            None => {}
        }
        meta.chunk_id = Some(chunk.sequence_index);
        meta
    }

    /// Look up a metadata field by its index name.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            FILE_NAME_FIELD => Some(Cow::Borrowed(self.file_name.as_str())),
            "source" => Some(Cow::Borrowed(self.source.as_str())),
            "page_num" => self.page_num.map(|n| Cow::Owned(n.to_string())),
            "paragraph" => self.paragraph.map(|n| Cow::Owned(n.to_string())),
            "chunk_id" => self.chunk_id.map(|n| Cow::Owned(n.to_string())),
            _ => None,
        }
    }

    /// The page or paragraph this chunk came from, if recorded.
    pub fn location(&self) -> Option<ChunkLocation> {
        self.page_num
            .map(ChunkLocation::Page)
            .or(self.paragraph.map(ChunkLocation::Paragraph))
    }
}

/// A chunk as written to the vector index by the ingestion flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    /// Text that gets embedded and returned by queries.
    pub content: String,
    /// blake3 hex digest of `content`.
    pub content_hash: String,
    pub metadata: ChunkMetadata,
}
