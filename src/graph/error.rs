//! Errors that escape the conversation graph

use super::machine::TransitionError;
use crate::llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The responder's completion call failed or timed out
    #[error("language model unavailable: {0}")]
    ModelUnavailable(#[source] LlmError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
