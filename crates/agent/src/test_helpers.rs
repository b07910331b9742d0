//! Shared test helpers for agent tests.

use askhound_core::completion::{CompletionClient, CompletionRequest, CompletionResponse, Usage};
use askhound_core::error::CompletionError;
use askhound_core::message::Message;
use std::sync::Mutex;

/// A mock client that returns a sequence of scripted results and records
/// every request it receives.
///
/// Each call to `complete` consumes the next scripted result. Panics if
/// more calls are made than results provided.
pub struct SequentialMockClient {
    results: Mutex<Vec<Result<CompletionResponse, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    call_count: Mutex<usize>,
}

impl SequentialMockClient {
    pub fn new(results: Vec<Result<CompletionResponse, CompletionError>>) -> Self {
        Self {
            results: Mutex::new(results),
            requests: Mutex::new(Vec::new()),
            call_count: Mutex::new(0),
        }
    }

    /// A client that returns a single text answer.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(make_text_response(text))])
    }

    /// A client whose first call fails with the given error.
    pub fn failing(error: CompletionError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl CompletionClient for SequentialMockClient {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);

        let mut count = self.call_count.lock().unwrap();
        let results = self.results.lock().unwrap();

        if *count >= results.len() {
            panic!(
                "SequentialMockClient: no more results (call #{}, have {})",
                *count,
                results.len()
            );
        }

        let result = results[*count].clone();
        *count += 1;
        result
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}
