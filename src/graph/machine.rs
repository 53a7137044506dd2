//! Pure state transitions for one pass through the graph
//!
//! `Start -> Responding -> (Done | Searching -> Done)`. The transition
//! function does no I/O; it returns the next step plus the effect the
//! driver must perform to produce the next event.

use super::router::{route, RoutingDecision};
use super::{ConversationState, Message};
use thiserror::Error;

/// Where the pipeline currently is. Every step after `Start` owns the
/// conversation accumulated so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Start,
    Responding(ConversationState),
    Searching(ConversationState),
    Done(ConversationState),
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Done(_))
    }
}

/// Inputs to the machine
#[derive(Debug, Clone)]
pub enum Event {
    /// Caller supplied the utterance
    Begin { text: String },
    /// Responder stage produced its message
    Responded(Message),
    /// Search stage produced its message
    Searched(Message),
}

/// Work the driver must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the responder stage on this state
    Respond(ConversationState),
    /// Run the search stage on this state
    Search(ConversationState),
    /// Return this text to the caller
    Finish { answer: String },
}

#[derive(Debug)]
pub struct TransitionResult {
    pub step: Step,
    pub effect: Effect,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(step: &Step, event: Event) -> Result<TransitionResult, TransitionError> {
    match (step, event) {
        (Step::Start, Event::Begin { text }) => {
            let state = ConversationState::new(text);
            Ok(TransitionResult {
                step: Step::Responding(state.clone()),
                effect: Effect::Respond(state),
            })
        }

        (Step::Responding(state), Event::Responded(message)) => {
            let state = state.append(message);
            match route(&state) {
                RoutingDecision::Continue => Ok(TransitionResult {
                    step: Step::Searching(state.clone()),
                    effect: Effect::Search(state),
                }),
                RoutingDecision::Terminate => Ok(finish(state)),
            }
        }

        (Step::Searching(state), Event::Searched(message)) => Ok(finish(state.append(message))),

        (step, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} in {step:?}"
        ))),
    }
}

fn finish(state: ConversationState) -> TransitionResult {
    let answer = state.last().text().to_string();
    TransitionResult {
        step: Step::Done(state),
        effect: Effect::Finish { answer },
    }
}
