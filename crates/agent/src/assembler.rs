//! Conversation assembly — turning a query, its history, and retrieved
//! documents into the ordered message sequence a completion call expects.
//!
//! The layout is fixed: one system prompt message, one system context
//! message, the trailing history window as user/assistant pairs
//! (oldest first), then the current query as the final user message.
//!
//! # Determinism
//!
//! Assembly is a pure function of its arguments: identical inputs always
//! produce identical message sequences. No clock, no randomness.

use askhound_core::document::Document;
use askhound_core::history::HistoryEntry;
use askhound_core::message::Message;
use serde::{Deserialize, Serialize};

/// Context string returned when retrieval found nothing.
pub const NO_DOCUMENTS_MARKER: &str = "No relevant documents found.";

/// The fixed instructional prompt sent as the first system message.
pub const SYSTEM_PROMPT: &str = "\
You are an intelligent AI assistant that helps answer questions about company documents.

Your responsibilities:
1. Answer user questions accurately based on provided context from company documents
2. If you need more information from documents, indicate that you're retrieving relevant documents
3. Always cite the source documents when providing answers
4. Be honest if information is not available in the documents
5. Maintain context from the conversation history

When answering, structure your response clearly and provide relevant document references.";

/// A packaged answer: the completion text plus the sources it was
/// grounded in, under the session that asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPackage {
    /// The completion's answer text.
    pub answer: String,
    /// Source identifiers of the retrieved documents, in ranked order,
    /// duplicates included.
    pub sources: Vec<String>,
    /// The session this exchange belongs to.
    pub session_id: String,
}

/// Builds message sequences for completion calls.
///
/// Stateless: the fields are layout limits, not accumulated data. The
/// defaults are what the service runs with; the builders exist for tests
/// and for callers that want a different prompt.
#[derive(Debug, Clone)]
pub struct ConversationAssembler {
    /// First system message content.
    system_prompt: String,
    /// At most this many documents render into the context block.
    max_context_docs: usize,
    /// Per-document content truncation, in characters.
    snippet_chars: usize,
    /// How many trailing history exchanges are replayed.
    history_window: usize,
}

impl Default for ConversationAssembler {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_context_docs: 3,
            snippet_chars: 500,
            history_window: 5,
        }
    }
}

impl ConversationAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the instructional system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Cap the number of documents rendered into the context block.
    pub fn with_max_context_docs(mut self, max: usize) -> Self {
        self.max_context_docs = max;
        self
    }

    /// Cap the per-document snippet length, in characters.
    pub fn with_snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }

    /// Set the trailing history window size, in exchanges.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Render retrieved documents into a single context string.
    ///
    /// Empty input yields the exact no-documents marker. Otherwise at most
    /// the first `max_context_docs` documents (an independent cap on top of
    /// whatever limit retrieval applied) render as numbered blocks with the
    /// source identifier and the first `snippet_chars` characters of
    /// content, ellipsis always appended.
    pub fn build_context(&self, documents: &[Document]) -> String {
        if documents.is_empty() {
            return NO_DOCUMENTS_MARKER.to_string();
        }

        let mut context = String::from("Relevant documents:");
        for (i, doc) in documents.iter().take(self.max_context_docs).enumerate() {
            let snippet: String = doc.content.chars().take(self.snippet_chars).collect();
            context.push_str(&format!(
                "\n\n[Document {}] Source: {}\n{}...",
                i + 1,
                doc.source,
                snippet
            ));
        }
        context
    }

    /// Build the full message sequence for one completion call.
    ///
    /// Order: system prompt, system "Context: ..." message, the last
    /// `history_window` exchanges as user/assistant pairs oldest-first,
    /// then the current query as the final user message.
    pub fn build_messages(
        &self,
        query: &str,
        history: &[HistoryEntry],
        context: &str,
    ) -> Vec<Message> {
        let mut messages = vec![
            Message::system(self.system_prompt.clone()),
            Message::system(format!("Context: {context}")),
        ];

        let window_start = history.len().saturating_sub(self.history_window);
        for entry in &history[window_start..] {
            messages.push(Message::user(entry.query.clone()));
            messages.push(Message::assistant(entry.answer.clone()));
        }

        messages.push(Message::user(query));
        messages
    }

    /// Package an answer with its cited sources under a session.
    pub fn package(
        &self,
        answer: impl Into<String>,
        sources: Vec<String>,
        session_id: impl Into<String>,
    ) -> AnswerPackage {
        AnswerPackage {
            answer: answer.into(),
            sources,
            session_id: session_id.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
