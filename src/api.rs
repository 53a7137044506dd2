//! HTTP API
//!
//! Thin shell over the conversation graph: a health probe, the ask
//! endpoint and the embedded chat page.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::graph::Conversation;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<Conversation>,
}

impl AppState {
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation: Arc::new(conversation),
        }
    }
}
