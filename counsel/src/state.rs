//! Agent state and routing types for the supervisor / expert graph.
//!
//! `AgentState` holds the conversation plus per-round tool data; the supervisor,
//! expert, and tool nodes read and write these fields. `RoutingDecision` is the
//! closed set of supervisor labels; anything the LLM returns outside this set
//! fails to parse and the supervisor falls back to `Finish`.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Supervisor routing decision. Exactly two labels exist; parsing is strict,
/// so any other label from the LLM is a deserialization error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Hand the request to the legal expert node.
    LegalExpert,
    /// Terminate the run.
    #[default]
    Finish,
}

impl RoutingDecision {
    /// Wire label, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDecision::LegalExpert => "legal_expert",
            RoutingDecision::Finish => "finish",
        }
    }
}

/// A single tool invocation produced by the expert's LLM turn.
///
/// Written by the expert node from LLM output; read by the tool node to call
/// `ToolSource::call_tool(name, arguments)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the ToolSource.
    pub name: String,
    /// Arguments as a JSON string; parsed by the tool node before the call.
    pub arguments: String,
    /// Optional id to match with `ToolResult::call_id`.
    pub id: Option<String>,
}

/// Result of executing one tool call.
///
/// Written by the tool node; one result per `ToolCall` in the same round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the tool call this result belongs to (if the call had `id`).
    pub call_id: Option<String>,
    /// Tool name; alternative to call_id for matching.
    pub name: Option<String>,
    /// Result text.
    pub content: String,
}

/// State flowing through the supervisor / expert graph.
///
/// `messages` is append-only within a run; nodes extend it but never remove or
/// rewrite earlier entries. Tool fields are per-round: the expert writes
/// `tool_calls`, the tool node replaces them with `tool_results`, and the
/// expert's final answer clears both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Conversation history (System, User, Assistant, Tool).
    pub messages: Vec<Message>,
    /// Latest supervisor routing decision.
    #[serde(default)]
    pub next: RoutingDecision,
    /// Current round tool calls from the expert (tool node reads these).
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    /// Current round tool execution results (tool node writes these).
    #[serde(default)]
    pub tool_results: Vec<ToolResult>,
    /// Expert answer rounds completed; input to the supervisor's turn guard.
    #[serde(default)]
    pub turn_count: u32,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            messages: vec![],
            next: RoutingDecision::Finish,
            tool_calls: vec![],
            tool_results: vec![],
            turn_count: 0,
        }
    }
}

impl AgentState {
    /// Returns the content of the chronologically last Assistant message, if any.
    ///
    /// Used by callers (CLI, server) to get the final reply without scanning
    /// `messages` themselves.
    pub fn last_assistant_reply(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Returns the content of the chronologically last User message, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::User(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
