//! Property-based tests for routing and the transition function

use super::machine::{transition, Effect, Event, Step};
use super::router::{route, RoutingDecision, SEARCH_PREFIX};
use super::{ConversationState, Message};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Zà-ú0-9 :.?!]{0,60}"
}

/// Replies that start with something other than the exact marker
fn arb_unmarked_reply() -> impl Strategy<Value = String> {
    arb_text().prop_filter("must not carry the marker", |s| !s.starts_with(SEARCH_PREFIX))
}

proptest! {
    #[test]
    fn marked_replies_always_continue(rest in arb_text()) {
        let state = ConversationState::new("q").append(Message::assistant(format!("{SEARCH_PREFIX}{rest}")));
        prop_assert_eq!(route(&state), RoutingDecision::Continue);
    }

    #[test]
    fn unmarked_replies_always_terminate(reply in arb_unmarked_reply()) {
        let state = ConversationState::new("q").append(Message::assistant(reply));
        prop_assert_eq!(route(&state), RoutingDecision::Terminate);
    }

    #[test]
    fn lowercase_marker_never_routes(rest in arb_text()) {
        let state = ConversationState::new("q").append(Message::assistant(format!("busca: {rest}")));
        prop_assert_eq!(route(&state), RoutingDecision::Terminate);
    }

    #[test]
    fn full_pass_appends_one_message_per_stage(
        utterance in arb_text(),
        reply in arb_text(),
        summary in arb_text(),
    ) {
        let begun = transition(&Step::Start, Event::Begin { text: utterance.clone() }).unwrap();
        let responded = transition(&begun.step, Event::Responded(Message::assistant(reply.clone()))).unwrap();

        let (final_step, answer) = match responded.effect {
            Effect::Search(_) => {
                let searched = transition(&responded.step, Event::Searched(Message::assistant(summary.clone()))).unwrap();
                prop_assert!(reply.starts_with(SEARCH_PREFIX));
                match searched.effect {
                    Effect::Finish { answer } => (searched.step, answer),
                    other => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
                }
            }
            Effect::Finish { answer } => {
                prop_assert!(!reply.starts_with(SEARCH_PREFIX));
                (responded.step, answer)
            }
            Effect::Respond(_) => return Err(TestCaseError::fail("respond after respond")),
        };

        match final_step {
            Step::Done(state) => {
                let expected_len = if reply.starts_with(SEARCH_PREFIX) { 3 } else { 2 };
                prop_assert_eq!(state.len(), expected_len);
                prop_assert_eq!(&state.messages()[0], &Message::user(utterance));
                prop_assert!(state.messages()[1..].iter().all(|m| !m.is_user()));
                prop_assert_eq!(state.last().text(), answer.as_str());
            }
            other => return Err(TestCaseError::fail(format!("not done: {other:?}"))),
        }
    }
}
