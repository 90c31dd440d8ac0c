//! Tool source abstraction: list tools and call a tool.
//!
//! The tool node and the expert LLM depend on `ToolSource` instead of a
//! concrete registry; implementations are [`LegalCodeToolSource`] (built-in
//! legal knowledge base) and [`MockToolSource`] (tests).

mod legal;
mod mock;

pub use legal::{LegalCodeToolSource, TOOL_INTERNAL_KNOWLEDGE_SEARCH, TOOL_SEARCH_LEGAL_CODE};
pub use mock::MockToolSource;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification: name, description, and JSON Schema for arguments.
///
/// **Interaction**: Returned by `ToolSource::list_tools()`; `ChatOpenAI`
/// converts these to Chat Completions tool definitions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name (used in tool_calls).
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
///
/// **Interaction**: Returned by `ToolSource::call_tool()`; `ToolNode` maps this
/// to a `ToolResult` and a `Message::Tool` in the agent state.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    /// Result text.
    pub text: String,
}

/// Errors from listing or calling tools.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Source of tools: list and call.
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Lists the tools this source provides.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Calls a tool by name with JSON arguments.
    async fn call_tool(&self, name: &str, arguments: Value)
        -> Result<ToolCallContent, ToolSourceError>;
}
