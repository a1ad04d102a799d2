use std::fmt;

use serde::{Deserialize, Serialize};

use super::ChunkMetadata;
use crate::constants::UNKNOWN_SOURCE;

/// Comparison applied by a metadata filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
}

/// Single-field metadata filter understood by every vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl MetadataFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Ne,
            value: value.into(),
        }
    }

    /// Evaluate the filter. A record missing the field never equals the
    /// value, so it passes `Ne` and fails `Eq`.
    pub fn matches(&self, metadata: &ChunkMetadata) -> bool {
        let actual = metadata.field(&self.field);
        let equal = actual.as_deref() == Some(self.value.as_str());
        match self.op {
            FilterOp::Eq => equal,
            FilterOp::Ne => !equal,
        }
    }
}

impl fmt::Display for MetadataFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            FilterOp::Eq => "==",
            FilterOp::Ne => "!=",
        };
        write!(f, "{} {} {:?}", self.field, op, self.value)
    }
}

/// One entry of a retrieval result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Display name of the originating file.
    pub fn source(&self) -> &str {
        if self.metadata.source.is_empty() {
            UNKNOWN_SOURCE
        } else {
            &self.metadata.source
        }
    }
}
