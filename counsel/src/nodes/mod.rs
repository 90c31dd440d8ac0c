//! Agent graph nodes: supervisor, legal expert, tool executor.

mod legal_expert;
mod supervisor;
mod tool_exec;

pub use legal_expert::LegalExpertNode;
pub use supervisor::SupervisorNode;
pub use tool_exec::ToolNode;

/// Node ids used when wiring the agent graph.
pub const SUPERVISOR_NODE_ID: &str = "supervisor";
pub const LEGAL_EXPERT_NODE_ID: &str = "legal_expert";
pub const LEGAL_TOOLS_NODE_ID: &str = "legal_tools";
