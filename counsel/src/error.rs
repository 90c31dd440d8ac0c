//! Agent execution error types.
//!
//! Returned by `Node::run` and `CompiledStateGraph::invoke`.

use thiserror::Error;

/// Agent execution error.
///
/// `ExecutionFailed` covers node, LLM, and tool failures that abort a run.
/// `StepLimitExceeded` is raised by the graph runner when a run takes more
/// node steps than the compiled limit allows.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, tool error).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The run exceeded the graph's step limit without reaching END.
    #[error("step limit exceeded: {0} steps")]
    StepLimitExceeded(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let err = AgentError::ExecutionFailed("msg".to_string());
        let s = err.to_string();
        assert!(
            s.contains("execution failed"),
            "Display should contain 'execution failed': {}",
            s
        );
        assert!(s.contains("msg"), "Display should contain message: {}", s);
    }

    /// **Scenario**: Display of StepLimitExceeded contains the limit.
    #[test]
    fn agent_error_display_step_limit() {
        let s = AgentError::StepLimitExceeded(25).to_string();
        assert!(s.contains("step limit"), "{}", s);
        assert!(s.contains("25"), "{}", s);
    }
}
