//! Chunk records as stored in the vector index.

use docai_core::errors::DocaiResult;
use docai_core::models::{Chunk, ChunkLocation, ChunkMetadata, ChunkRecord};

use crate::chunker;
use crate::document::ExtractedDocument;

/// Chunk every segment of `doc`, numbering chunks within their segment.
pub fn chunk_document(
    doc: &ExtractedDocument,
    chunk_size: usize,
    overlap: usize,
) -> DocaiResult<Vec<Chunk>> {
    let mut chunks = Vec::new();
    for segment in &doc.segments {
        let location = doc.location(segment);
        for (sequence_index, text) in chunker::split(&segment.text, chunk_size, overlap)?
            .into_iter()
            .enumerate()
        {
            chunks.push(Chunk {
                text,
                source_file: doc.file_name.clone(),
                location: Some(location),
                sequence_index,
            });
        }
    }
    Ok(chunks)
}

/// Stable index id: `{file}_page{n}_{i}` for PDF pages, `{file}_para{n-1}_{i}`
/// for DOCX paragraphs.
pub fn record_id(chunk: &Chunk) -> String {
    match chunk.location {
        Some(ChunkLocation::Page(n)) => {
            format!("{}_page{}_{}", chunk.source_file, n, chunk.sequence_index)
        }
        Some(ChunkLocation::Paragraph(n)) => format!(
            "{}_para{}_{}",
            chunk.source_file,
            n.saturating_sub(1),
            chunk.sequence_index
        ),
        None => format!("{}_{}", chunk.source_file, chunk.sequence_index),
    }
}

/// Prefix chunk text with the file-name header so the embedding carries it.
pub fn with_header(file_name: &str, text: &str) -> String {
    format!("檔案名稱：{file_name}\n內容：{text}")
}

/// Build the index record for `chunk`.
pub fn to_record(chunk: &Chunk, content_header: bool) -> ChunkRecord {
    let content = if content_header {
        with_header(&chunk.source_file, &chunk.text)
    } else {
        chunk.text.clone()
    };
    let content_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    ChunkRecord {
        id: record_id(chunk),
        content,
        content_hash,
        metadata: ChunkMetadata::for_chunk(chunk),
    }
}
