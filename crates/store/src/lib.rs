//! # Askhound Store
//!
//! The document collection behind retrieval: an in-memory, append-only list
//! of (source, content) pairs loaded once at startup from a flat directory
//! of `.txt` files.
//!
//! Retrieval is a single-pass Jaccard scorer over the whole collection.
//! There is no index and no persistence beyond the source files themselves;
//! the corpus is assumed small enough that scoring every document per query
//! is cheaper than maintaining anything smarter.

mod score;
mod seed;

use askhound_core::document::{Document, DocumentStats};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Default number of documents returned by retrieval.
pub const DEFAULT_TOP_K: usize = 3;

/// The in-memory document collection.
///
/// Append-only within a process lifetime: documents are never mutated or
/// removed once inserted, so insertion order is stable and usable as the
/// retrieval tie-break.
pub struct DocumentStore {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Load every `.txt` file in `dir` (non-recursive), filename as source.
    ///
    /// If `dir` does not exist it is created and seeded with a small fixed
    /// corpus first. Files are visited in sorted filename order so the
    /// insertion order — and therefore the retrieval tie-break — does not
    /// depend on directory enumeration order.
    ///
    /// I/O failures never propagate: a directory-level error abandons the
    /// load, an unreadable file is skipped, and in both cases the collection
    /// keeps whatever was already inserted. Returns the number of documents
    /// loaded by this call.
    pub async fn load(&self, dir: &Path) -> usize {
        if !dir.exists() {
            if let Err(e) = seed::write_seed_documents(dir) {
                error!(dir = %dir.display(), error = %e, "Failed to seed document directory");
                return 0;
            }
            info!(dir = %dir.display(), "Created document directory with seed corpus");
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "Failed to read document directory");
                return 0;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("txt"))
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable document");
                    continue;
                }
            };
            let source = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            loaded.push(Document::new(source, content));
        }

        let count = loaded.len();
        self.documents.write().await.extend(loaded);
        info!(count, dir = %dir.display(), "Loaded documents");
        count
    }

    /// Append a document. No deduplication, no emptiness check.
    pub async fn add(&self, source: impl Into<String>, content: impl Into<String>) {
        let doc = Document::new(source, content);
        info!(source = %doc.source, "Added document");
        self.documents.write().await.push(doc);
    }

    /// Rank every stored document against `query` by Jaccard similarity and
    /// return the best matches.
    ///
    /// The ranking is a stable descending sort, so equal scores keep
    /// insertion order: first inserted wins ties. The top `top_k` candidates
    /// are selected after ranking, then anything with score <= 0 is dropped,
    /// which is why an empty-token query (or an empty collection) yields an
    /// empty result rather than arbitrary documents.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Vec<Document> {
        let documents = self.documents.read().await;
        if documents.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, &Document)> = documents
            .iter()
            .map(|doc| (score::jaccard(query, &doc.content), doc))
            .collect();

        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_k);
        ranked.retain(|(score, _)| *score > 0.0);

        ranked.into_iter().map(|(_, doc)| doc.clone()).collect()
    }

    /// Read-only aggregate: document count, total content characters, and
    /// the source list in insertion order.
    pub async fn stats(&self) -> DocumentStats {
        let documents = self.documents.read().await;
        DocumentStats {
            total_documents: documents.len(),
            total_characters: documents.iter().map(|d| d.content.chars().count()).sum(),
            sources: documents.iter().map(|d| d.source.clone()).collect(),
        }
    }

    /// Number of stored documents.
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
