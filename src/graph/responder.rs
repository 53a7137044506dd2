//! Conversational responder stage
//!
//! Classifies and answers the utterance in a single model call. The
//! refusal, search-marker and did-not-understand rules live in the system
//! instruction; nothing here checks that the model followed them.

use super::{ConversationState, GraphError, Message};
use crate::llm::{LlmRequest, LlmService};
use std::sync::Arc;

/// Exact reply for the restricted domain
#[allow(dead_code)] // Repeated verbatim inside SYSTEM_PROMPT
pub const REFUSAL_REPLY: &str = "Desculpe, mas não posso conversar sobre esse tema.";

/// Exact reply for incomplete or nonsensical input
#[allow(dead_code)] // Repeated verbatim inside SYSTEM_PROMPT
pub const NOT_UNDERSTOOD_REPLY: &str = "Desculpe, não entendi sua pergunta.";

/// Rules are listed in precedence order: restricted domain, search intent,
/// unintelligible input, general answer.
pub const SYSTEM_PROMPT: &str = r#"Você é um assistente conversacional especializado em diversos temas, exceto Engenharia Civil.

**Regras:**
- Se perguntarem sobre Engenharia Civil ou tópicos relacionados, responda EXATAMENTE com: "Desculpe, mas não posso conversar sobre esse tema."
- Se a pergunta indicar que o usuário deseja realizar uma busca (por exemplo, conter palavras como "pesquise", "busque", "encontre informações sobre"), então responda EXATAMENTE com: "BUSCA: <pergunta_original>".
- Se a query estiver incompleta ou não fizer sentido, responda EXATAMENTE com: "Desculpe, não entendi sua pergunta."
- Caso contrário, responda normalmente com base no seu conhecimento geral.
"#;

pub struct Responder {
    llm: Arc<dyn LlmService>,
}

impl Responder {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    /// Answer the last message of `state`; earlier messages are ignored.
    pub async fn respond(&self, state: &ConversationState) -> Result<Message, GraphError> {
        let utterance = state.last().text();
        tracing::info!(input = %utterance, "User input");

        let request = LlmRequest::with_system(SYSTEM_PROMPT, utterance);
        let response = self
            .llm
            .complete(&request)
            .await
            .map_err(GraphError::ModelUnavailable)?;

        tracing::info!(output = %response.text, "Responder output");
        Ok(Message::assistant(response.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::MockLlmService;
    use crate::llm::{LlmError, LlmErrorKind};

    #[tokio::test]
    async fn test_sends_policy_and_last_utterance() {
        let llm = Arc::new(MockLlmService::new("test-model"));
        llm.queue_text("Python é uma linguagem.");
        let responder = Responder::new(llm.clone());

        let state = ConversationState::new("Me fale sobre programação em Python.");
        let reply = responder.respond(&state).await.unwrap();

        assert_eq!(reply, Message::assistant("Python é uma linguagem."));

        let requests = llm.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(requests[0].prompt, "Me fale sobre programação em Python.");
    }

    #[tokio::test]
    async fn test_uses_only_last_message() {
        let llm = Arc::new(MockLlmService::new("test-model"));
        llm.queue_text("ok");
        let responder = Responder::new(llm.clone());

        let state = ConversationState::new("primeira")
            .append(Message::assistant("resposta"))
            .append(Message::user("segunda"));
        responder.respond(&state).await.unwrap();

        assert_eq!(llm.recorded_requests()[0].prompt, "segunda");
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let llm = Arc::new(MockLlmService::new("test-model"));
        llm.queue_error(LlmError::network("timeout"));
        let responder = Responder::new(llm);

        let err = responder
            .respond(&ConversationState::new("oi"))
            .await
            .unwrap_err();
        match err {
            GraphError::ModelUnavailable(e) => assert_eq!(e.kind, LlmErrorKind::Network),
            other => panic!("expected ModelUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_prompt_mentions_fixed_replies() {
        assert!(SYSTEM_PROMPT.contains(REFUSAL_REPLY));
        assert!(SYSTEM_PROMPT.contains(NOT_UNDERSTOOD_REPLY));
        assert!(SYSTEM_PROMPT.contains(crate::graph::SEARCH_PREFIX.trim_end()));
    }
}
