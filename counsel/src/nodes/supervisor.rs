//! Supervisor node: decides whether the legal expert works next or the run ends.
//!
//! The decision comes from the LLM as strict JSON `{"next": "..."}` parsed into
//! [`RoutingDecision`]. Only two labels exist; an unknown label, malformed
//! JSON, or an LLM failure all resolve to `Finish` so a broken model can never
//! wedge the run.
//!
//! Two guards keep the loop finite without an LLM in the loop:
//! - when the last message is an assistant answer, the supervisor finishes
//!   immediately (the expert already replied; re-routing would loop forever);
//! - when `turn_count` reaches `max_turns`, the supervisor finishes regardless
//!   of what the model says.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::SUPERVISOR_PROMPT;
use crate::state::{AgentState, RoutingDecision};

use super::SUPERVISOR_NODE_ID;

/// Structured routing response expected from the LLM.
#[derive(Debug, Deserialize)]
struct RouteResponse {
    next: RoutingDecision,
}

/// Supervisor node. Holds the routing LLM and the per-run turn budget.
pub struct SupervisorNode {
    llm: Arc<dyn LlmClient>,
    max_turns: u32,
}

impl SupervisorNode {
    pub fn new(llm: Arc<dyn LlmClient>, max_turns: u32) -> Self {
        Self { llm, max_turns }
    }

    /// Strips markdown code fences some models wrap JSON in.
    fn strip_code_fences(content: &str) -> &str {
        let trimmed = content.trim();
        let trimmed = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .unwrap_or(trimmed);
        trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
    }

    /// Parses the LLM reply into a routing decision. Anything that is not
    /// valid `{"next": ...}` JSON with a known label is `Finish`.
    fn parse_decision(content: &str) -> RoutingDecision {
        let cleaned = Self::strip_code_fences(content);
        match serde_json::from_str::<RouteResponse>(cleaned) {
            Ok(route) => route.next,
            Err(e) => {
                warn!(error = %e, content = %content, "unparseable routing response, finishing");
                RoutingDecision::Finish
            }
        }
    }
}

#[async_trait]
impl Node<AgentState> for SupervisorNode {
    fn id(&self) -> &str {
        SUPERVISOR_NODE_ID
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut state = state;

        // The expert already produced a final answer; re-routing to it without
        // new user input would loop forever.
        if matches!(state.messages.last(), Some(Message::Assistant(_))) {
            debug!("last message is an assistant answer, finishing");
            state.next = RoutingDecision::Finish;
            return Ok((state, Next::Continue));
        }

        if state.turn_count >= self.max_turns {
            warn!(
                turn_count = state.turn_count,
                max_turns = self.max_turns,
                "turn budget exhausted, finishing"
            );
            state.next = RoutingDecision::Finish;
            return Ok((state, Next::Continue));
        }

        let mut request = Vec::with_capacity(state.messages.len() + 1);
        request.push(Message::system(SUPERVISOR_PROMPT));
        request.extend(state.messages.iter().cloned());

        let decision = match self.llm.invoke(&request).await {
            Ok(response) => Self::parse_decision(&response.content),
            Err(e) => {
                warn!(error = %e, "supervisor LLM failed, finishing");
                RoutingDecision::Finish
            }
        };

        debug!(decision = decision.as_str(), "supervisor routing decision");
        state.next = decision;
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    fn run_state(messages: Vec<Message>) -> AgentState {
        AgentState {
            messages,
            ..AgentState::default()
        }
    }

    /// **Scenario**: A legal-routing JSON reply sets next to LegalExpert.
    #[tokio::test]
    async fn routes_to_legal_expert_on_valid_json() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls(r#"{"next": "legal_expert"}"#)),
            3,
        );
        let (state, next) = node
            .run(run_state(vec![Message::user("Как расторгнуть договор?")]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::LegalExpert);
        assert_eq!(next, Next::Continue);
    }

    /// **Scenario**: A finish reply sets next to Finish.
    #[tokio::test]
    async fn routes_to_finish_on_finish_label() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls(r#"{"next": "finish"}"#)),
            3,
        );
        let (state, _) = node
            .run(run_state(vec![Message::user("Привет, кто ты?")]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }

    /// **Scenario**: An unknown routing label fails safe to Finish.
    #[tokio::test]
    async fn unknown_label_fails_safe_to_finish() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls(
                r#"{"next": "accounting_expert"}"#,
            )),
            3,
        );
        let (state, _) = node
            .run(run_state(vec![Message::user("Вопрос про отчётность")]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }

    /// **Scenario**: Malformed (non-JSON) output fails safe to Finish.
    #[tokio::test]
    async fn malformed_output_fails_safe_to_finish() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls("LegalExpert, пожалуйста")),
            3,
        );
        let (state, _) = node
            .run(run_state(vec![Message::user("x")]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }

    /// **Scenario**: JSON wrapped in markdown code fences still parses.
    #[tokio::test]
    async fn code_fenced_json_still_parses() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls(
                "```json\n{\"next\": \"legal_expert\"}\n```",
            )),
            3,
        );
        let (state, _) = node
            .run(run_state(vec![Message::user("Нужна консультация юриста")]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::LegalExpert);
    }

    /// **Scenario**: An LLM failure resolves to Finish, not an error.
    #[tokio::test]
    async fn llm_failure_fails_safe_to_finish() {
        let node = SupervisorNode::new(Arc::new(MockLlm::failing()), 3);
        let result = node.run(run_state(vec![Message::user("x")])).await;
        let (state, _) = result.unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }

    /// **Scenario**: An assistant answer as the last message finishes without
    /// touching the LLM (a failing mock proves no call happens).
    #[tokio::test]
    async fn assistant_last_message_short_circuits_to_finish() {
        let node = SupervisorNode::new(Arc::new(MockLlm::failing()), 3);
        let (state, _) = node
            .run(run_state(vec![
                Message::user("Вопрос"),
                Message::assistant("Ответ юриста."),
            ]))
            .await
            .unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }

    /// **Scenario**: Exhausted turn budget finishes regardless of the model.
    #[tokio::test]
    async fn turn_budget_exhausted_finishes() {
        let node = SupervisorNode::new(
            Arc::new(MockLlm::with_no_tool_calls(r#"{"next": "legal_expert"}"#)),
            2,
        );
        let mut state = run_state(vec![Message::user("Ещё вопрос")]);
        state.turn_count = 2;
        let (state, _) = node.run(state).await.unwrap();
        assert_eq!(state.next, RoutingDecision::Finish);
    }
}
