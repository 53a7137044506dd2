//! API request and response types

use serde::{Deserialize, Serialize};

/// Question sent by the chat page
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// Successful answer
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
