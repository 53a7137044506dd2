//! Search error types

use thiserror::Error;

/// Search error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::RateLimit, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::Http, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::MalformedResponse, message)
    }
}

/// Why the search backend could not answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    /// Timeout or connection failure
    Network,
    /// Rejected credentials (401, 403)
    Auth,
    /// Rate limited (429)
    RateLimit,
    /// Any other non-success status
    Http,
    /// Body could not be decoded
    MalformedResponse,
}
