//! Next-step result from a graph node.

/// Next step after running a node.
///
/// - **Continue**: follow the node's outgoing edge (or stop when there is none).
/// - **Node(id)**: jump to the given node.
/// - **End**: stop; return current state as final result.
///
/// Nodes with conditional edges ignore this value; the router decides instead.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the outgoing edge; if the node has none, equivalent to End.
    Continue,
    /// Run the node with the given id next.
    Node(String),
    /// Stop and return the current state.
    End,
}
