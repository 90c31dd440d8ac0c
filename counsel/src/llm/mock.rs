//! Mock LLM for tests and offline demos.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// Canned-response LLM. Returns a fixed response on every invoke, or a
/// two-phase sequence (tool calls first, then a final answer) when built with
/// [`MockLlm::first_tools_then_answer`].
pub struct MockLlm {
    content: String,
    tool_calls: Vec<ToolCall>,
    second_content: Option<String>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockLlm {
    /// Mock that always answers with `content` and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
            second_content: None,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Mock that always answers with `content` and the given tool calls.
    pub fn new(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            second_content: None,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Stateful mock: the first invoke returns `tool_call`, every later invoke
    /// returns `final_content` with no tool calls. Models an expert that looks
    /// something up once and then answers.
    pub fn first_tools_then_answer(
        tool_call: ToolCall,
        final_content: impl Into<String>,
    ) -> Self {
        Self {
            content: String::new(),
            tool_calls: vec![tool_call],
            second_content: Some(final_content.into()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Mock whose every invoke fails with `ExecutionFailed`.
    pub fn failing() -> Self {
        Self {
            content: String::new(),
            tool_calls: vec![],
            second_content: None,
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        if self.fail {
            return Err(AgentError::ExecutionFailed("mock LLM failure".to_string()));
        }
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref final_content) = self.second_content {
            if n == 0 {
                return Ok(LlmResponse {
                    content: self.content.clone(),
                    tool_calls: self.tool_calls.clone(),
                });
            }
            return Ok(LlmResponse {
                content: final_content.clone(),
                tool_calls: vec![],
            });
        }
        Ok(LlmResponse {
            content: self.content.clone(),
            tool_calls: self.tool_calls.clone(),
        })
    }
}
