//! Conversation graph
//!
//! One stateless pass per call: the responder answers or flags a search,
//! the router inspects that answer, and the search stage runs only when
//! flagged. `Conversation::converse` is the single entry point.

mod error;
mod machine;
mod message;
pub mod responder;
mod router;
pub mod search_stage;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use error::GraphError;

use machine::{transition, Effect, Event, Step};
use message::{ConversationState, Message};
use responder::Responder;
use router::SEARCH_PREFIX;
use search_stage::SearchStage;

use crate::llm::LlmService;
use crate::search::SearchService;
use std::sync::Arc;

/// Responder and search stage wired together. Holds only shared client
/// handles, so one instance serves any number of concurrent calls.
pub struct Conversation {
    responder: Responder,
    search: SearchStage,
}

impl Conversation {
    pub fn new(llm: Arc<dyn LlmService>, search: Arc<dyn SearchService>) -> Self {
        Self {
            responder: Responder::new(llm.clone()),
            search: SearchStage::new(llm, search),
        }
    }

    /// Run one full pass and return the final message text.
    ///
    /// Callers must reject blank input before calling. Only a responder
    /// model failure surfaces as an error; search problems come back as
    /// fixed replies. Dropping the future cancels any in-flight call.
    pub async fn converse(&self, text: &str) -> Result<String, GraphError> {
        let mut step = Step::Start;
        let mut event = Event::Begin {
            text: text.to_string(),
        };

        loop {
            let result = transition(&step, event)?;
            step = result.step;
            event = match result.effect {
                Effect::Respond(state) => Event::Responded(self.responder.respond(&state).await?),
                Effect::Search(state) => Event::Searched(self.search.search(&state).await),
                Effect::Finish { answer } => {
                    tracing::debug!(terminal = step.is_terminal(), "Conversation pass finished");
                    return Ok(answer);
                }
            };
        }
    }
}
