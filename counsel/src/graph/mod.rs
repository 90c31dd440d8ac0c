//! State graph engine: nodes, edges, conditional routing, and the run loop.
//!
//! Build a [`StateGraph`], register nodes and edges (with [`START`] / [`END`]
//! sentinels), then [`StateGraph::compile`] into a [`CompiledStateGraph`] and
//! `invoke` it with an initial state.

mod compile_error;
mod compiled;
mod conditional;
pub mod logging;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_STEP_LIMIT};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use next::Next;
pub use node::Node;
pub use node_middleware::NodeMiddleware;
pub use state_graph::{StateGraph, END, START};
