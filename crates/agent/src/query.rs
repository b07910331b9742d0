//! The query pipeline — one retrieval-augmented exchange end to end.
//!
//! # Flow
//!
//! 1. Retrieve the top-k documents for the query
//! 2. Render them into a context string (or the no-documents marker)
//! 3. Assemble the full message sequence with the trailing history window
//! 4. Submit to the completion endpoint
//! 5. Package the answer with the cited sources
//!
//! Completion failures are logged and propagated unchanged; there is no
//! retry here.

use crate::assembler::{AnswerPackage, ConversationAssembler};
use askhound_core::completion::{CompletionClient, CompletionRequest};
use askhound_core::error::Result;
use askhound_core::history::HistoryEntry;
use askhound_store::{DocumentStore, DEFAULT_TOP_K};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Answers queries against the document store via the completion endpoint.
pub struct QueryAgent {
    /// Document collection to retrieve from.
    store: Arc<DocumentStore>,
    /// Completion endpoint client.
    client: Arc<dyn CompletionClient>,
    /// Message layout.
    assembler: ConversationAssembler,
    /// Model or deployment name passed to the endpoint.
    model: String,
    /// Sampling temperature.
    temperature: f32,
    /// Output token cap.
    max_tokens: u32,
    /// Retrieval depth.
    top_k: usize,
}

impl QueryAgent {
    /// Create a new agent with the default parameters
    /// (temperature 0.7, 1000-token cap, top-3 retrieval).
    pub fn new(
        store: Arc<DocumentStore>,
        client: Arc<dyn CompletionClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            client,
            assembler: ConversationAssembler::new(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 1000,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the retrieval depth.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Replace the message assembler.
    pub fn with_assembler(mut self, assembler: ConversationAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Run one exchange: retrieve, assemble, complete, package.
    pub async fn answer(
        &self,
        query: &str,
        history: &[HistoryEntry],
        session_id: &str,
    ) -> Result<AnswerPackage> {
        info!(session_id = %session_id, "Processing query");

        let documents = self.store.retrieve(query, self.top_k).await;
        let sources: Vec<String> = documents.iter().map(|d| d.source.clone()).collect();
        debug!(retrieved = documents.len(), "Retrieval complete");

        let context = self.assembler.build_context(&documents);
        let messages = self.assembler.build_messages(query, history, &context);

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        };

        let response = match self.client.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Completion call failed");
                return Err(e.into());
            }
        };

        info!(
            sources = sources.len(),
            answer_len = response.message.content.len(),
            "Answer generated"
        );

        Ok(self
            .assembler
            .package(response.message.content, sources, session_id))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use askhound_core::error::{CompletionError, Error};
    use askhound_core::message::Role;

    async fn store_with_leave_doc() -> Arc<DocumentStore> {
        let store = Arc::new(DocumentStore::new());
        store.add("leave.txt", "annual leave 20 days").await;
        store
    }

    #[tokio::test]
    async fn answer_packages_sources_in_ranked_order() {
        let store = store_with_leave_doc().await;
        let client = Arc::new(SequentialMockClient::single_text("You get 20 days."));
        let agent = QueryAgent::new(store, client, "mock-model");

        let package = agent
            .answer("How many annual leave days?", &[], "s1")
            .await
            .unwrap();

        assert_eq!(package.answer, "You get 20 days.");
        assert_eq!(package.sources, vec!["leave.txt"]);
        assert_eq!(package.session_id, "s1");
    }

    #[tokio::test]
    async fn answer_works_with_empty_store() {
        let store = Arc::new(DocumentStore::new());
        let client = Arc::new(SequentialMockClient::single_text("I have no documents."));
        let agent = QueryAgent::new(store, client.clone(), "mock-model");

        let package = agent.answer("anything", &[], "s1").await.unwrap();
        assert!(package.sources.is_empty());
        assert_eq!(package.answer, "I have no documents.");

        // The completion still ran, with the no-documents marker as context.
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].messages[1].content,
            "Context: No relevant documents found."
        );
    }

    #[tokio::test]
    async fn completion_request_carries_default_parameters() {
        let store = store_with_leave_doc().await;
        let client = Arc::new(SequentialMockClient::single_text("ok"));
        let agent = QueryAgent::new(store, client.clone(), "gpt-4");

        agent.answer("annual leave", &[], "s1").await.unwrap();

        let requests = client.requests();
        let request = &requests[0];
        assert_eq!(request.model, "gpt-4");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, Some(1000));
    }

    #[tokio::test]
    async fn history_is_replayed_into_the_request() {
        let store = store_with_leave_doc().await;
        let client = Arc::new(SequentialMockClient::single_text("ok"));
        let agent = QueryAgent::new(store, client.clone(), "mock-model");

        let history = vec![HistoryEntry::new("earlier question", "earlier answer")];
        agent
            .answer("annual leave days?", &history, "s1")
            .await
            .unwrap();

        let requests = client.requests();
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[2].content, "earlier question");
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[3].content, "earlier answer");
        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[4].content, "annual leave days?");
    }

    #[tokio::test]
    async fn completion_failure_propagates_unchanged() {
        let store = store_with_leave_doc().await;
        let client = Arc::new(SequentialMockClient::failing(
            CompletionError::AuthenticationFailed("bad api key".into()),
        ));
        let agent = QueryAgent::new(store, client, "mock-model");

        let err = agent.answer("annual leave", &[], "s1").await.unwrap_err();
        match err {
            Error::Completion(CompletionError::AuthenticationFailed(reason)) => {
                assert!(reason.contains("bad api key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn builders_override_default_parameters() {
        let store = store_with_leave_doc().await;
        let client = Arc::new(SequentialMockClient::single_text("ok"));
        let agent = QueryAgent::new(store, client.clone(), "mock-model")
            .with_temperature(0.2)
            .with_max_tokens(256)
            .with_top_k(1);

        agent.answer("annual leave", &[], "s1").await.unwrap();

        let requests = client.requests();
        assert!((requests[0].temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(requests[0].max_tokens, Some(256));
    }
}
