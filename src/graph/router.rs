//! Routing after the responder stage

use super::ConversationState;

/// Literal marker the responder emits when the user asked for a search.
/// Exact, case-sensitive, trailing space included.
pub const SEARCH_PREFIX: &str = "BUSCA: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Hand the state to the search stage
    Continue,
    /// The last message is the final answer
    Terminate,
}

/// Decide the next stage from the last message alone.
///
/// Only the exact prefix routes to search. A reply that merely mentions
/// "BUSCA" or drops the space terminates; model drift here silently skips
/// the search stage.
pub fn route(state: &ConversationState) -> RoutingDecision {
    if state.last().text().starts_with(SEARCH_PREFIX) {
        RoutingDecision::Continue
    } else {
        RoutingDecision::Terminate
    }
}
