//! Extracted document text, as handed over by a PDF or DOCX reader.

use std::path::Path;

use docai_core::constants::SUPPORTED_EXTENSIONS;
use docai_core::errors::{DocaiResult, IngestionError};
use docai_core::models::ChunkLocation;

/// Source format of a document in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => SUPPORTED_EXTENSIONS[0],
            Self::Docx => SUPPORTED_EXTENSIONS[1],
        }
    }
}

/// Recognise a pool document by its extension, case-insensitively.
pub fn document_kind(file_name: &str) -> Option<DocumentKind> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "docx" => Some(DocumentKind::Docx),
        _ => None,
    }
}

/// One page of a PDF or one paragraph of a DOCX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based page or paragraph number.
    pub number: u32,
    pub text: String,
}

/// The text of a single document, split into its pages or paragraphs.
///
/// Segments never hold empty text; the constructors drop them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub segments: Vec<Segment>,
}

impl ExtractedDocument {
    /// Build a PDF document from per-page text in page order.
    ///
    /// Page numbers follow the input position, so dropped blank pages leave gaps.
    pub fn from_pdf_pages<I, S>(file_name: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = pages
            .into_iter()
            .zip(1u32..)
            .filter_map(|(page, number)| {
                let text = collapse_whitespace(page.as_ref());
                (!text.is_empty()).then_some(Segment { number, text })
            })
            .collect();
        Self {
            file_name: file_name.into(),
            kind: DocumentKind::Pdf,
            segments,
        }
    }

    /// Build a DOCX document from its paragraphs.
    ///
    /// Blank paragraphs are dropped before numbering.
    pub fn from_docx_paragraphs<I, S>(file_name: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = paragraphs
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .zip(1u32..)
            .map(|(text, number)| Segment { number, text })
            .collect();
        Self {
            file_name: file_name.into(),
            kind: DocumentKind::Docx,
            segments,
        }
    }

    /// Build a document whose kind is taken from the file extension.
    pub fn from_segments<I, S>(file_name: impl Into<String>, segments: I) -> DocaiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let file_name = file_name.into();
        match document_kind(&file_name) {
            Some(DocumentKind::Pdf) => Ok(Self::from_pdf_pages(file_name, segments)),
            Some(DocumentKind::Docx) => Ok(Self::from_docx_paragraphs(file_name, segments)),
            None => Err(IngestionError::UnsupportedFormat { file_name }.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Location tag for a segment of this document.
    pub fn location(&self, segment: &Segment) -> ChunkLocation {
        match self.kind {
            DocumentKind::Pdf => ChunkLocation::Page(segment.number),
            DocumentKind::Docx => ChunkLocation::Paragraph(segment.number),
        }
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_case_insensitive() {
        assert_eq!(document_kind("Report.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(document_kind("notes.DocX"), Some(DocumentKind::Docx));
        assert_eq!(document_kind("notes.txt"), None);
        assert_eq!(document_kind("pdf"), None);
    }

    #[test]
    fn pdf_pages_are_collapsed_and_blank_pages_dropped() {
        let doc = ExtractedDocument::from_pdf_pages("a.pdf", ["第一頁\n\n  內容", "  ", "第三頁"]);
        assert_eq!(doc.segments.len(), 2);
        assert_eq!(doc.segments[0].text, "第一頁 內容");
        assert_eq!(doc.segments[0].number, 1);
        assert_eq!(doc.segments[1].number, 3);
    }

    #[test]
    fn docx_paragraphs_are_numbered_after_filtering() {
        let doc = ExtractedDocument::from_docx_paragraphs("a.docx", ["", " first ", "", "second"]);
        assert_eq!(doc.segments.len(), 2);
        assert_eq!(doc.segments[0].text, "first");
        assert_eq!(doc.segments[1].number, 2);
        assert_eq!(doc.location(&doc.segments[1]), ChunkLocation::Paragraph(2));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = ExtractedDocument::from_segments("a.txt", ["x"]).unwrap_err();
        assert!(err.to_string().contains("a.txt"));
    }
}
