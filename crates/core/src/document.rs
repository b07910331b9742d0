//! Document domain types.
//!
//! A document is a (source, content) pair: the source is a display
//! identifier (usually the filename it was loaded from, or a caller-chosen
//! title), the content is raw unstructured text. Both fields are fixed at
//! construction; the store never mutates a document after insertion.

use serde::{Deserialize, Serialize};

/// A single document in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display identifier (filename or title). Uniqueness is not enforced.
    pub source: String,

    /// Raw text content.
    pub content: String,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }
}

/// Read-only aggregate over the document collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of stored documents.
    pub total_documents: usize,

    /// Sum of content lengths in characters.
    pub total_characters: usize,

    /// Source identifiers in insertion order.
    pub sources: Vec<String>,
}
