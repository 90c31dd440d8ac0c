//! Legal expert node: answers legal questions, optionally via tools.
//!
//! Each run sends the conversation (with the expert system prompt) to the LLM.
//! When the model requests tools, the calls are written to `state.tool_calls`
//! and the conditional edge routes to the tool node; when it answers in text,
//! the answer is appended and the flow returns to the supervisor. An LLM
//! failure degrades to an apologetic assistant message so the supervisor can
//! finish the run normally.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::LEGAL_EXPERT_PROMPT;
use crate::state::AgentState;

use super::LEGAL_EXPERT_NODE_ID;

const LLM_FAILURE_REPLY: &str =
    "Извините, не удалось получить ответ от юридической службы. Попробуйте позже.";

/// Legal expert node. Holds the expert LLM (usually configured with tools).
pub struct LegalExpertNode {
    llm: Arc<dyn LlmClient>,
}

impl LegalExpertNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState> for LegalExpertNode {
    fn id(&self) -> &str {
        LEGAL_EXPERT_NODE_ID
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut state = state;

        let mut request = Vec::with_capacity(state.messages.len() + 1);
        request.push(Message::system(LEGAL_EXPERT_PROMPT));
        request.extend(state.messages.iter().cloned());

        match self.llm.invoke(&request).await {
            Ok(response) if !response.tool_calls.is_empty() => {
                debug!(
                    tool_calls = response.tool_calls.len(),
                    "expert requested tools"
                );
                if !response.content.is_empty() {
                    state.messages.push(Message::assistant(&response.content));
                }
                state.tool_calls = response.tool_calls;
            }
            Ok(response) => {
                debug!("expert produced final answer");
                state.messages.push(Message::assistant(&response.content));
                state.tool_calls = vec![];
                state.tool_results = vec![];
                state.turn_count += 1;
            }
            Err(e) => {
                warn!(error = %e, "expert LLM failed, returning fallback reply");
                state.messages.push(Message::assistant(LLM_FAILURE_REPLY));
                state.tool_calls = vec![];
                state.turn_count += 1;
            }
        }

        Ok((state, Next::Continue))
    }
}
