//! Web search abstraction
//!
//! Mirrors the `llm` module: a provider trait, a concrete backend and a
//! logging decorator.

mod error;
mod tavily;

pub use error::SearchError;
#[cfg(test)]
pub use error::SearchErrorKind;
pub use tavily::TavilyService;

use async_trait::async_trait;
use std::sync::Arc;

/// One search hit. Only hits with non-blank `text` are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub text: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl SearchResult {
    #[cfg(test)]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The snippet text, if present and non-blank
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Common interface for web search providers
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run a query, returning at most `max_results` hits in ranking order.
    /// An empty list is a valid answer.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError>;

    /// Provider name for logs
    fn provider(&self) -> &str;
}

/// Logging wrapper for search services
pub struct LoggingSearchService {
    inner: Arc<dyn SearchService>,
}

impl LoggingSearchService {
    pub fn new(inner: Arc<dyn SearchService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SearchService for LoggingSearchService {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let start = std::time::Instant::now();
        let result = self.inner.search(query, max_results).await;
        let duration = start.elapsed();

        match &result {
            Ok(results) => {
                tracing::info!(
                    provider = %self.inner.provider(),
                    duration_ms = %duration.as_millis(),
                    count = results.len(),
                    "Search request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    provider = %self.inner.provider(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Search request failed"
                );
            }
        }

        result
    }

    fn provider(&self) -> &str {
        self.inner.provider()
    }
}
