//! Conversation messages and the append-only state they live in

use std::sync::Arc;

/// A single message in one exchange. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    User { text: String },
    Assistant { text: String },
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Message::User { text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Message::Assistant { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Message::User { text } | Message::Assistant { text } => text,
        }
    }

    #[cfg(test)]
    pub fn is_user(&self) -> bool {
        matches!(self, Message::User { .. })
    }
}

/// Ordered, append-only message sequence for one `converse` call.
///
/// Always starts with exactly one user message. `append` returns a new
/// state; existing states are never modified, so cloning is cheap and a
/// state handed to a stage cannot change underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    messages: Arc<[Message]>,
}

impl ConversationState {
    /// Seed a state with the caller's utterance
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            messages: Arc::from(vec![Message::user(utterance)]),
        }
    }

    #[must_use]
    pub fn append(&self, message: Message) -> Self {
        let messages: Vec<Message> = self
            .messages
            .iter()
            .cloned()
            .chain(std::iter::once(message))
            .collect();
        Self {
            messages: Arc::from(messages),
        }
    }

    /// The most recent message. Never fails: a state is never empty.
    pub fn last(&self) -> &Message {
        &self.messages[self.messages.len() - 1]
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_single_user_message() {
        let state = ConversationState::new("Olá");
        assert_eq!(state.len(), 1);
        assert!(state.last().is_user());
        assert_eq!(state.last().text(), "Olá");
    }

    #[test]
    fn test_append_leaves_original_untouched() {
        let original = ConversationState::new("pergunta");
        let extended = original.append(Message::assistant("resposta"));

        assert_eq!(original.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.messages()[0], Message::user("pergunta"));
        assert_eq!(extended.last(), &Message::assistant("resposta"));
    }

    #[test]
    fn test_branching_from_same_state() {
        let base = ConversationState::new("q");
        let a = base.append(Message::assistant("a"));
        let b = base.append(Message::assistant("b"));
        assert_eq!(a.last().text(), "a");
        assert_eq!(b.last().text(), "b");
        assert_eq!(base.len(), 1);
    }
}
