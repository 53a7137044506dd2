//! Tavily web search provider

use super::{SearchError, SearchResult, SearchService};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tavily search API client
pub struct TavilyService {
    client: Client,
    api_key: String,
    url: String,
}

impl TavilyService {
    pub fn new(api_key: String, base_url: Option<&str>) -> Result<Self, SearchError> {
        let url = format!(
            "{}/search",
            base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
        );

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            url,
        })
    }

    fn parse_results(body: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response: TavilyResponse = serde_json::from_str(body)
            .map_err(|e| SearchError::malformed(format!("Failed to parse response: {e}")))?;

        Ok(response
            .results
            .into_iter()
            .map(|r| SearchResult {
                text: r.content,
                title: r.title,
                url: r.url,
            })
            .collect())
    }
}

#[async_trait]
impl SearchService for TavilyService {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            max_results,
            search_depth: "basic",
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::network(format!("Request timeout: {e}"))
                } else {
                    SearchError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        Self::parse_results(&body)
    }

    fn provider(&self) -> &str {
        "tavily"
    }
}

/// Map a non-success status to an error kind
fn classify_status(status: StatusCode, body: &str) -> SearchError {
    match status.as_u16() {
        401 | 403 => SearchError::auth(format!("Authentication failed: HTTP {status}")),
        429 => SearchError::rate_limit(format!("Rate limit exceeded: HTTP {status}")),
        _ => SearchError::http(format!("HTTP {status}: {}", body.trim())),
    }
}

// Tavily API types

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}
