//! Structured logging for graph execution events.

use std::fmt::Debug;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "starting node");
}

/// Log the input state of the node about to run.
pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::debug!(node_id = node_id, state = ?state, "node input state");
}

/// Log node execution completion with the node's routing result.
pub fn log_node_complete(node_id: &str, next: &crate::graph::Next) {
    tracing::debug!(node_id = node_id, ?next, "node complete");
}

/// Log graph execution start.
pub fn log_graph_start() {
    tracing::info!("starting graph run");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: u32) {
    tracing::info!(steps = steps, "graph run complete");
}

/// Log graph execution error.
pub fn log_graph_error(error: &crate::error::AgentError) {
    tracing::error!(?error, "graph run failed");
}
