//! Tool node: executes pending tool_calls against a ToolSource.
//!
//! Every tool call produces exactly one `Message::Tool` and one `ToolResult`;
//! a tool error becomes result text instead of aborting the run, so the expert
//! always sees an observation for each call it made.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::{AgentState, ToolResult};
use crate::tool_source::ToolSource;

use super::LEGAL_TOOLS_NODE_ID;

/// Parses ToolCall.arguments string to JSON Value. Logs a warning on parse failure.
fn parse_tool_arguments(arguments: &str) -> Value {
    let raw = if arguments.trim().is_empty() {
        serde_json::json!({})
    } else {
        match serde_json::from_str(arguments) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, arguments = %arguments, "tool arguments JSON parse failed, using empty object");
                serde_json::json!({})
            }
        }
    };
    // Some models double-encode arguments as a JSON string.
    if let Some(s) = raw.as_str() {
        serde_json::from_str(s).unwrap_or_else(|e| {
            warn!(error = %e, "nested tool arguments JSON parse failed");
            raw
        })
    } else {
        raw
    }
}

/// Tool executor node. Holds the tool source shared with the expert LLM.
pub struct ToolNode {
    tools: Box<dyn ToolSource>,
}

impl ToolNode {
    pub fn new(tools: Box<dyn ToolSource>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl Node<AgentState> for ToolNode {
    fn id(&self) -> &str {
        LEGAL_TOOLS_NODE_ID
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut state = state;
        let mut tool_results = Vec::with_capacity(state.tool_calls.len());

        for tc in &state.tool_calls {
            let args = parse_tool_arguments(&tc.arguments);
            debug!(tool = %tc.name, args = %args, "executing tool call");

            let text = match self.tools.call_tool(&tc.name, args).await {
                Ok(content) => content.text,
                Err(e) => {
                    warn!(tool = %tc.name, error = %e, "tool call failed");
                    format!("Ошибка инструмента {}: {}", tc.name, e)
                }
            };

            state.messages.push(Message::tool(&tc.name, &text));
            tool_results.push(ToolResult {
                call_id: tc.id.clone(),
                name: Some(tc.name.clone()),
                content: text,
            });
        }

        state.tool_calls = vec![];
        state.tool_results = tool_results;
        Ok((state, Next::Continue))
    }
}
