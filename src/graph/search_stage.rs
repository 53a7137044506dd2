//! Search-and-summarize stage
//!
//! Runs only after the router saw the search marker. Search is a
//! best-effort enhancement: every failure in here becomes a fixed reply
//! instead of an error.

use super::{ConversationState, Message, SEARCH_PREFIX};
use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::search::{SearchError, SearchResult, SearchService};
use std::sync::Arc;
use thiserror::Error;

/// Results requested from the search backend and kept in the digest
pub const SEARCH_TOP_K: usize = 10;

pub const EMPTY_QUERY_REPLY: &str = "Erro: Nenhuma consulta válida para busca.";
pub const NO_RESULTS_REPLY: &str = "Nenhum resultado relevante encontrado.";
pub const NO_USABLE_RESULTS_REPLY: &str =
    "Não foi possível encontrar informações relevantes sobre esse tema.";
pub const SEARCH_FAILED_REPLY: &str = "Erro ao processar a busca. Tente novamente.";

/// How a search pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing left after stripping the marker
    EmptyQuery,
    /// Backend returned an empty list
    NoResults,
    /// Every result lacked text
    NoUsableResults,
    /// Model summary of the digest
    Summary(String),
    /// Backend or summarizer failed
    Failed,
}

impl SearchOutcome {
    pub fn into_text(self) -> String {
        match self {
            SearchOutcome::EmptyQuery => EMPTY_QUERY_REPLY.to_string(),
            SearchOutcome::NoResults => NO_RESULTS_REPLY.to_string(),
            SearchOutcome::NoUsableResults => NO_USABLE_RESULTS_REPLY.to_string(),
            SearchOutcome::Summary(text) => text,
            SearchOutcome::Failed => SEARCH_FAILED_REPLY.to_string(),
        }
    }
}

#[derive(Debug, Error)]
enum SearchStageError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    #[error("summarization failed: {0}")]
    Summarize(#[from] LlmError),
}

pub struct SearchStage {
    llm: Arc<dyn LlmService>,
    search: Arc<dyn SearchService>,
}

impl SearchStage {
    pub fn new(llm: Arc<dyn LlmService>, search: Arc<dyn SearchService>) -> Self {
        Self { llm, search }
    }

    /// Produce the final assistant message for a flagged state. Never fails.
    pub async fn search(&self, state: &ConversationState) -> Message {
        Message::assistant(self.run(state).await.into_text())
    }

    pub async fn run(&self, state: &ConversationState) -> SearchOutcome {
        match self.try_run(state).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Failed to process search");
                SearchOutcome::Failed
            }
        }
    }

    async fn try_run(&self, state: &ConversationState) -> Result<SearchOutcome, SearchStageError> {
        let query = extract_query(state.last().text());
        if query.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        tracing::info!(query = %query, "Running search");
        let results = self.search.search(query, SEARCH_TOP_K).await?;
        if results.is_empty() {
            return Ok(SearchOutcome::NoResults);
        }

        let digest = build_digest(&results);
        if digest.trim().is_empty() {
            return Ok(SearchOutcome::NoUsableResults);
        }
        tracing::info!(digest = %digest, "Search results processed for summarization");

        let prompt = format!("Resuma as informações sobre {query}: {digest}");
        let response = self.llm.complete(&LlmRequest::prompt(prompt)).await?;
        Ok(SearchOutcome::Summary(response.text))
    }
}

/// Strip the search marker and surrounding whitespace
fn extract_query(text: &str) -> &str {
    text.strip_prefix(SEARCH_PREFIX).unwrap_or(text).trim()
}

/// Bullet the usable snippets among the first `SEARCH_TOP_K` results,
/// separated by blank lines. Blank snippets are skipped; kept ones go in
/// as returned, untrimmed. The cap applies even when the backend ignored
/// `max_results`.
fn build_digest(results: &[SearchResult]) -> String {
    let mut bullets = Vec::new();
    for result in results.iter().take(SEARCH_TOP_K) {
        if result.usable_text().is_none() {
            continue;
        }
        let text = result.text.as_deref().unwrap_or_default();
        tracing::debug!(title = ?result.title, url = ?result.url, "Search hit kept");
        bullets.push(format!("\u{2022} {text}"));
    }
    bullets.join("\n\n")
}
