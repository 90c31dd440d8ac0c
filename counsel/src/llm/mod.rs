//! LLM client abstraction and implementations.
//!
//! [`LlmClient`] is the seam between graph nodes and the model: nodes hold an
//! `Arc<dyn LlmClient>` and call `invoke` with the conversation so far. The
//! production implementation is [`ChatOpenAI`]; [`MockLlm`] returns canned
//! responses for tests and offline demos.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

/// LLM response: assistant text plus any tool calls the model requested.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

/// Chat-model client. Implementations: [`ChatOpenAI`], [`MockLlm`].
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the message list to the model and returns its response.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
