//! Mock tool source for tests: fixed tool list, fixed call result.

use async_trait::async_trait;
use serde_json::Value;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Fixed-response tool source. `call_tool` returns the same text for any tool
/// name and arguments.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    call_result: String,
}

impl MockToolSource {
    pub fn new(tools: Vec<ToolSpec>, call_result: String) -> Self {
        Self { tools, call_result }
    }

    /// One-tool example: a `search_legal_code` spec with a fixed result.
    pub fn legal_search_example() -> Self {
        Self::new(
            vec![ToolSpec {
                name: "search_legal_code".to_string(),
                description: Some("Поиск по кодексам РФ.".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"]
                }),
            }],
            "ГК РФ Статья 454. Договор купли-продажи.".to_string(),
        )
    }

    /// Replaces the fixed call result.
    pub fn with_call_result(mut self, call_result: String) -> Self {
        self.call_result = call_result;
        self
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        _name: &str,
        _arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        Ok(ToolCallContent {
            text: self.call_result.clone(),
        })
    }
}
