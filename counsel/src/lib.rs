//! Counsel: a supervisor / legal-expert agent pair running on a state graph.
//!
//! A Supervisor node routes each user request either to the Legal Expert node
//! or to the end of the run. The expert may call lookup tools; tool output is
//! fed back to the expert, whose final answer returns control to the supervisor.
//!
//! Build the fixed graph with [`runner::build_agent_graph`], or assemble a
//! custom one from [`graph::StateGraph`] and your own [`graph::Node`]s.

pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod nodes;
pub mod prompts;
pub mod runner;
pub mod settings;
pub mod state;
pub mod tool_source;

pub use error::AgentError;
pub use graph::{CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use message::Message;
pub use state::{AgentState, RoutingDecision, ToolCall, ToolResult};
