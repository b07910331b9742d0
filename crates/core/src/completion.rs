//! CompletionClient trait — the abstraction over the hosted LLM endpoint.
//!
//! A client knows how to submit an assembled message sequence and return a
//! single answer. The agent calls `complete()` without knowing which backend
//! is configured, which also makes scripted test doubles trivial.
//!
//! There is no streaming surface: the service makes one call per exchange
//! and waits for the full answer.

use crate::error::CompletionError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters for a single completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model or deployment name (e.g., "gpt-4").
    pub model: String,

    /// The assembled message sequence, in order.
    pub messages: Vec<Message>,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap.
    #[serde(default = "default_max_tokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

pub fn default_temperature() -> f32 {
    0.7
}

pub fn default_max_tokens() -> Option<u32> {
    Some(1000)
}

/// A complete response from the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated message (role is always assistant in practice).
    pub message: Message,

    /// Token usage statistics, when the endpoint reports them.
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested).
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The completion client trait.
///
/// Failures propagate unchanged to the caller; retry policy, if any,
/// belongs to whoever is driving the exchange.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "azure_openai").
    fn name(&self) -> &str;

    /// Submit a request and wait for the complete response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, CompletionError>;
}
