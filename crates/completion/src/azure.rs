//! Azure OpenAI chat-completions client.
//!
//! Azure routes by deployment name in the URL path and authenticates with
//! an `api-key` header, unlike the plain OpenAI `/v1/chat/completions` +
//! bearer-token shape. Everything else — request body, response envelope —
//! is the standard chat-completions wire format.
//!
//! Single-shot only: one POST per exchange, no streaming, no retries.

use askhound_core::completion::{CompletionClient, CompletionRequest, CompletionResponse, Usage};
use askhound_core::error::CompletionError;
use askhound_core::message::Message;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// The api-version the original deployment was pinned to.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// A chat-completions client for an Azure OpenAI deployment.
pub struct AzureOpenAiClient {
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    /// Create a new client for `deployment` hosted at `endpoint`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client,
        }
    }

    /// Override the api-version query parameter.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    /// Build the wire request body. `model` rides along for compatibility;
    /// Azure itself routes by the deployment in the URL and ignores it.
    fn request_body(request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    fn name(&self) -> &str {
        "azure_openai"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, CompletionError> {
        if self.endpoint.is_empty() || self.api_key.is_empty() {
            return Err(CompletionError::NotConfigured(
                "Azure OpenAI endpoint and api key must be set".into(),
            ));
        }

        let url = self.completions_url();
        let body = Self::request_body(&request);

        debug!(deployment = %self.deployment, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(e.to_string())
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);
            return Err(CompletionError::RateLimited { retry_after_secs });
        }

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Endpoint returned error");
            return Err(CompletionError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::ApiError {
                    status_code: 200,
                    message: format!("Failed to parse response: {e}"),
                })?;

        let model = api_response.model.unwrap_or_else(|| request.model.clone());

        let choice = api_response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::EmptyResponse(format!("deployment {}", self.deployment))
        })?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            message,
            usage,
            model,
        })
    }
}

// --- Chat-completions API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = AzureOpenAiClient::new("https://example.openai.azure.com/", "key", "gpt-4");
        assert_eq!(
            client.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn api_version_override() {
        let client = AzureOpenAiClient::new("https://example.openai.azure.com", "key", "gpt-4")
            .with_api_version("2024-06-01");
        assert!(client.completions_url().ends_with("api-version=2024-06-01"));
    }

    #[test]
    fn request_body_shape() {
        let request = CompletionRequest {
            model: "gpt-4".into(),
            messages: vec![Message::system("ctx"), Message::user("question")],
            temperature: 0.7,
            max_tokens: Some(1000),
        };

        let body = AzureOpenAiClient::request_body(&request);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "question");
    }

    #[test]
    fn request_body_omits_absent_max_tokens() {
        let request = CompletionRequest {
            model: "gpt-4".into(),
            messages: vec![],
            temperature: 0.7,
            max_tokens: None,
        };

        let body = AzureOpenAiClient::request_body(&request);
        assert!(body.get("max_tokens").is_none());
    }

    // --- Response parsing tests ---

    #[test]
    fn parse_standard_response() {
        let data = r#"{
            "id": "chatcmpl-123",
            "model": "gpt-4",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Twenty days."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 50, "completion_tokens": 4, "total_tokens": 54}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert_eq!(parsed.model.as_deref(), Some("gpt-4"));
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Twenty days.")
        );
        assert_eq!(parsed.usage.unwrap().total_tokens, 54);
    }

    #[test]
    fn parse_response_without_usage() {
        let data = r#"{"model": "gpt-4", "choices": [{"message": {"content": "hi"}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.usage.is_none());
    }

    #[test]
    fn parse_response_with_null_content() {
        // Content can be null when the model returns nothing usable.
        let data = r#"{"choices": [{"message": {"content": null}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn parse_response_with_empty_choices() {
        let data = r#"{"model": "gpt-4", "choices": []}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
