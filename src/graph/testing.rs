//! Mock implementations for testing
//!
//! These mocks drive the graph without real I/O and record every call.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::search::{SearchError, SearchResult, SearchService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

type Handler = Box<dyn Fn(&LlmRequest) -> Result<LlmResponse, LlmError> + Send + Sync>;

// ============================================================================
// Mock LLM
// ============================================================================

/// Mock LLM that returns queued responses, falling back to an optional
/// handler once the queue is empty
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    handler: Option<Handler>,
    delay: Option<Duration>,
    model_id: String,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            handler: None,
            delay: None,
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer unqueued requests by computing a response from the request
    pub fn with_handler(
        mut self,
        handler: impl Fn(&LlmRequest) -> Result<LlmResponse, LlmError> + Send + Sync + 'static,
    ) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Sleep before answering (for cancellation tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LlmResponse::text(text)));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let queued = self.responses.lock().unwrap().pop_front();
        match (queued, &self.handler) {
            (Some(result), _) => result,
            (None, Some(handler)) => handler(request),
            (None, None) => Err(LlmError::network("No mock response queued")),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Mock Search
// ============================================================================

/// Mock search backend with queued result lists
pub struct MockSearchService {
    responses: Mutex<VecDeque<Result<Vec<SearchResult>, SearchError>>>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_results(&self, results: Vec<SearchResult>) {
        self.responses.lock().unwrap().push_back(Ok(results));
    }

    pub fn queue_error(&self, error: SearchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// (query, `max_results`) for every call made
    pub fn recorded_queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::http("No mock results queued")))
    }

    fn provider(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_llm_queue_then_handler() {
        let mock = MockLlmService::new("m")
            .with_handler(|req| Ok(LlmResponse::text(format!("eco: {}", req.prompt))));
        mock.queue_text("primeiro");

        let first = mock.complete(&LlmRequest::prompt("a")).await.unwrap();
        let second = mock.complete(&LlmRequest::prompt("b")).await.unwrap();

        assert_eq!(first.text, "primeiro");
        assert_eq!(second.text, "eco: b");
        assert_eq!(mock.recorded_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_llm_empty_queue_errors() {
        let mock = MockLlmService::new("m");
        assert!(mock.complete(&LlmRequest::prompt("a")).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_search_empty_queue_errors() {
        let mock = MockSearchService::default();
        assert!(mock.search("q", 3).await.is_err());
        assert_eq!(mock.recorded_queries(), vec![("q".to_string(), 3)]);
    }
}
