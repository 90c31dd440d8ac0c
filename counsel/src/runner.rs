//! Agent graph assembly: supervisor, legal expert, and tool node wiring.
//!
//! The graph is fixed:
//!
//! ```text
//! START -> supervisor -(next)-> legal_expert | END
//!          legal_expert -(tool_calls?)-> legal_tools | supervisor
//!          legal_tools -> legal_expert
//! ```
//!
//! [`build_agent_graph`] wires any `LlmClient`s and `ToolSource` (used by
//! tests with mocks); [`build_openai_graph`] is the production entry point
//! building `ChatOpenAI` clients and the built-in legal tool source from an
//! [`AgentConfig`].

use std::collections::HashMap;
use std::sync::Arc;

use async_openai::config::OpenAIConfig;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::message::Message;
use crate::nodes::{
    LegalExpertNode, SupervisorNode, ToolNode, LEGAL_EXPERT_NODE_ID, LEGAL_TOOLS_NODE_ID,
    SUPERVISOR_NODE_ID,
};
use crate::settings::AgentConfig;
use crate::state::AgentState;
use crate::tool_source::{LegalCodeToolSource, ToolSource};

/// Wires the supervisor / expert / tools graph from the given parts.
///
/// `max_turns` bounds expert answer rounds (supervisor guard); `step_limit`
/// bounds total node steps (graph guard).
pub fn build_agent_graph(
    supervisor_llm: Arc<dyn LlmClient>,
    expert_llm: Arc<dyn LlmClient>,
    tools: Box<dyn ToolSource>,
    max_turns: u32,
    step_limit: u32,
) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
    let mut graph = StateGraph::<AgentState>::new().with_step_limit(step_limit);

    graph.add_node(
        SUPERVISOR_NODE_ID,
        Arc::new(SupervisorNode::new(supervisor_llm, max_turns)),
    );
    graph.add_node(
        LEGAL_EXPERT_NODE_ID,
        Arc::new(LegalExpertNode::new(expert_llm)),
    );
    graph.add_node(LEGAL_TOOLS_NODE_ID, Arc::new(ToolNode::new(tools)));

    graph.add_edge(START, SUPERVISOR_NODE_ID);

    // Supervisor: route on the decision it just wrote into state.next.
    let path_map: HashMap<String, String> = [
        (
            "legal_expert".to_string(),
            LEGAL_EXPERT_NODE_ID.to_string(),
        ),
        ("finish".to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();
    graph.add_conditional_edges(
        SUPERVISOR_NODE_ID,
        Arc::new(|s: &AgentState| s.next.as_str().to_string()),
        Some(path_map),
    );

    // Expert: pending tool calls go to the tool node, otherwise back to the
    // supervisor for the finish decision.
    graph.add_conditional_edges(
        LEGAL_EXPERT_NODE_ID,
        Arc::new(|s: &AgentState| {
            if s.tool_calls.is_empty() {
                SUPERVISOR_NODE_ID.to_string()
            } else {
                LEGAL_TOOLS_NODE_ID.to_string()
            }
        }),
        None,
    );

    // Tool output always returns to the expert.
    graph.add_edge(LEGAL_TOOLS_NODE_ID, LEGAL_EXPERT_NODE_ID);

    graph.compile()
}

/// Builds the production graph: `ChatOpenAI` supervisor and expert (the expert
/// sees the legal tools), and a `ToolNode` over [`LegalCodeToolSource`].
pub async fn build_openai_graph(
    config: &AgentConfig,
) -> Result<CompiledStateGraph<AgentState>, AgentError> {
    let mut openai_config = OpenAIConfig::new();
    if let Some(ref key) = config.api_key {
        openai_config = openai_config.with_api_key(key);
    }
    if let Some(ref base) = config.api_base {
        openai_config = openai_config.with_api_base(base);
    }

    let tool_source = LegalCodeToolSource::new();
    let tools = tool_source
        .list_tools()
        .await
        .map_err(|e| AgentError::ExecutionFailed(format!("tool listing failed: {}", e)))?;

    let mut supervisor_llm = ChatOpenAI::with_config(openai_config.clone(), &config.model);
    let mut expert_llm =
        ChatOpenAI::with_config(openai_config, &config.model).with_tools(tools);
    if let Some(t) = config.temperature {
        supervisor_llm = supervisor_llm.with_temperature(t);
        expert_llm = expert_llm.with_temperature(t);
    }

    build_agent_graph(
        Arc::new(supervisor_llm),
        Arc::new(expert_llm),
        Box::new(tool_source),
        config.max_turns,
        config.step_limit,
    )
    .map_err(|e| AgentError::ExecutionFailed(format!("graph compilation failed: {}", e)))
}

/// Initial state for one user query.
pub fn initial_state(query: impl Into<String>) -> AgentState {
    AgentState {
        messages: vec![Message::user(query)],
        ..AgentState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::settings::AgentConfig;
    use crate::state::RoutingDecision;
    use crate::tool_source::MockToolSource;

    /// **Scenario**: The fixed graph compiles with mock parts.
    #[test]
    fn agent_graph_compiles() {
        let graph = build_agent_graph(
            Arc::new(MockLlm::with_no_tool_calls(r#"{"next": "finish"}"#)),
            Arc::new(MockLlm::with_no_tool_calls("ответ")),
            Box::new(MockToolSource::legal_search_example()),
            3,
            25,
        );
        assert!(graph.is_ok());
    }

    /// **Scenario**: build_openai_graph compiles from a default config (no API call made).
    #[tokio::test]
    async fn openai_graph_builds_from_default_config() {
        let config = AgentConfig::default();
        let graph = build_openai_graph(&config).await;
        assert!(graph.is_ok());
    }

    /// **Scenario**: initial_state carries the query as the only (user) message.
    #[test]
    fn initial_state_has_single_user_message() {
        let s = initial_state("Привет, кто ты?");
        assert_eq!(s.messages.len(), 1);
        assert!(matches!(&s.messages[0], Message::User(q) if q == "Привет, кто ты?"));
        assert_eq!(s.next, RoutingDecision::Finish);
    }
}
