//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Runs from the first node; after each node,
//! the conditional router (when present) or the node's returned `Next` chooses
//! the next node. Every run is bounded by the step limit so a graph that never
//! routes to END cannot spin forever.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state,
};
use super::node_middleware::NodeMiddleware;
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Default upper bound on node steps per run.
pub const DEFAULT_STEP_LIMIT: u32 = 25;

/// Compiled graph: immutable structure, supports invoke only.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (from START).
    pub(super) first_node_id: String,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    /// Optional node middleware wrapping each node.run.
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// Upper bound on node steps per run.
    pub(super) step_limit: u32,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn execute_node(&self, node: Arc<dyn Node<S>>, state: S) -> Result<(S, Next), AgentError> {
        if let Some(middleware) = &self.middleware {
            let node_id = node.id().to_string();
            let node_clone = node.clone();
            middleware
                .around_run(
                    &node_id,
                    state,
                    Box::new(move |s| {
                        let node = node_clone.clone();
                        Box::pin(async move { node.run(s).await })
                    }),
                )
                .await
        } else {
            node.run(state).await
        }
    }

    /// Runs the graph with the given state and returns the final state.
    ///
    /// Starts at the first node; after each node, uses the conditional router
    /// (when the node has conditional edges) or the node's returned `Next` to
    /// choose the next node. Aborts with `AgentError::StepLimitExceeded` when
    /// the run takes more node steps than the compiled limit.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        if self.nodes.is_empty() || !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        let mut state = state;
        let mut current_id = self.first_node_id.clone();
        let mut steps: u32 = 0;

        log_graph_start();

        loop {
            if steps >= self.step_limit {
                let err = AgentError::StepLimitExceeded(self.step_limit);
                log_graph_error(&err);
                return Err(err);
            }
            steps += 1;

            let node = match self.nodes.get(&current_id) {
                Some(n) => n.clone(),
                None => {
                    let err = AgentError::ExecutionFailed(format!("unknown node: {}", current_id));
                    log_graph_error(&err);
                    return Err(err);
                }
            };

            log_node_start(&current_id);
            log_node_state(&current_id, &state);

            let (new_state, next) = match self.execute_node(node, state.clone()).await {
                Ok(output) => output,
                Err(e) => {
                    log_graph_error(&e);
                    return Err(e);
                }
            };
            state = new_state;

            log_node_complete(&current_id, &next);

            let next_id: Option<String> =
                if let Some(NextEntry::Conditional(router)) = self.next_map.get(&current_id) {
                    let target = router.resolve_next(&state);
                    tracing::debug!(from = %current_id, to = %target, "conditional routing");
                    Some(target)
                } else {
                    match next {
                        Next::End => None,
                        Next::Node(id) => Some(id),
                        Next::Continue => self.next_map.get(&current_id).and_then(|e| {
                            if let NextEntry::Unconditional(id) = e {
                                Some(id.clone())
                            } else {
                                None
                            }
                        }),
                    }
                };

            match next_id {
                None => break,
                Some(id) if id == END => break,
                Some(id) => current_id = id,
            }
        }

        log_graph_complete(steps);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::graph::{Next, Node, StateGraph, END, START};

    /// **Scenario**: Invoking an empty graph returns ExecutionFailed("empty graph").
    #[tokio::test]
    async fn invoke_empty_graph_returns_execution_failed() {
        let graph = CompiledStateGraph::<i32> {
            nodes: HashMap::new(),
            first_node_id: String::new(),
            next_map: HashMap::new(),
            middleware: None,
            step_limit: DEFAULT_STEP_LIMIT,
        };
        let result = graph.invoke(0).await;
        match &result {
            Err(AgentError::ExecutionFailed(msg)) => {
                assert!(msg.contains("empty graph"), "{}", msg)
            }
            _ => panic!("expected ExecutionFailed(\"empty graph\"), got {:?}", result),
        }
    }

    #[derive(Clone)]
    struct AddNode {
        id: &'static str,
        delta: i32,
    }

    #[async_trait]
    impl Node<i32> for AddNode {
        fn id(&self) -> &str {
            self.id
        }

        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            Ok((state + self.delta, Next::Continue))
        }
    }

    /// Node that always loops back to itself via conditional routing.
    #[derive(Clone)]
    struct LoopNode;

    #[async_trait]
    impl Node<i32> for LoopNode {
        fn id(&self) -> &str {
            "looper"
        }
        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            Ok((state + 1, Next::Continue))
        }
    }

    fn build_two_step_graph() -> StateGraph<i32> {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("first", Arc::new(AddNode { id: "first", delta: 1 }));
        graph.add_node("second", Arc::new(AddNode { id: "second", delta: 2 }));
        graph.add_edge(START, "first");
        graph.add_edge("first", "second");
        graph.add_edge("second", END);
        graph
    }

    /// **Scenario**: Two linear nodes run in order; final state is the sum of deltas.
    #[tokio::test]
    async fn invoke_linear_chain_runs_in_order() {
        let compiled = build_two_step_graph().compile().expect("graph compiles");
        let out = compiled.invoke(0).await.unwrap();
        assert_eq!(out, 3, "0 -> first(+1) -> second(+2)");
    }

    /// **Scenario**: Conditional edges with a path_map route based on state.
    #[tokio::test]
    async fn invoke_conditional_edges_routes_by_state() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("decide", Arc::new(AddNode { id: "decide", delta: 0 }));
        graph.add_node("even_node", Arc::new(AddNode { id: "even_node", delta: 10 }));
        graph.add_node("odd_node", Arc::new(AddNode { id: "odd_node", delta: 100 }));
        graph.add_edge(START, "decide");
        graph.add_edge("even_node", END);
        graph.add_edge("odd_node", END);
        let path_map: HashMap<String, String> = [
            ("even".to_string(), "even_node".to_string()),
            ("odd".to_string(), "odd_node".to_string()),
        ]
        .into_iter()
        .collect();
        graph.add_conditional_edges(
            "decide",
            Arc::new(|s: &i32| if s % 2 == 0 { "even".into() } else { "odd".into() }),
            Some(path_map),
        );
        let compiled = graph.compile().expect("graph compiles");
        assert_eq!(compiled.invoke(2).await.unwrap(), 12, "even -> +10");
        assert_eq!(compiled.invoke(1).await.unwrap(), 101, "odd -> +100");
    }

    /// **Scenario**: Conditional edges without a path_map use the router key as node id (or END).
    #[tokio::test]
    async fn invoke_conditional_edges_no_path_map_uses_key_as_node_id() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("decide", Arc::new(AddNode { id: "decide", delta: 0 }));
        graph.add_node("go_a", Arc::new(AddNode { id: "go_a", delta: 1 }));
        graph.add_edge(START, "decide");
        graph.add_edge("go_a", END);
        graph.add_conditional_edges(
            "decide",
            Arc::new(|s: &i32| if *s > 0 { "go_a".into() } else { END.into() }),
            None,
        );
        let compiled = graph.compile().expect("graph compiles");
        assert_eq!(compiled.invoke(1).await.unwrap(), 2, "s>0 -> go_a -> +1");
        assert_eq!(compiled.invoke(0).await.unwrap(), 0, "s<=0 -> END directly");
    }

    /// **Scenario**: Node returning Next::Node(id) jumps to that node.
    #[tokio::test]
    async fn invoke_next_node_jumps_to_specified_node() {
        #[derive(Clone)]
        struct JumpNode;
        #[async_trait]
        impl Node<i32> for JumpNode {
            fn id(&self) -> &str {
                "first"
            }
            async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
                Ok((state + 1, Next::Node("third".to_string())))
            }
        }

        let mut graph = StateGraph::<i32>::new();
        graph.add_node("first", Arc::new(JumpNode));
        graph.add_node("second", Arc::new(AddNode { id: "second", delta: 10 }));
        graph.add_node("third", Arc::new(AddNode { id: "third", delta: 100 }));
        graph.add_edge(START, "first");
        graph.add_edge("first", "second");
        graph.add_edge("second", "third");
        graph.add_edge("third", END);
        let compiled = graph.compile().expect("graph compiles");
        let out = compiled.invoke(0).await.unwrap();
        // first: 0+1=1, jumps to third: 1+100=101 (second skipped).
        assert_eq!(out, 101);
    }

    /// **Scenario**: A graph that never routes to END aborts with StepLimitExceeded.
    #[tokio::test]
    async fn invoke_step_limit_aborts_endless_loop() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("looper", Arc::new(LoopNode));
        graph.add_edge(START, "looper");
        graph.add_conditional_edges("looper", Arc::new(|_: &i32| "looper".to_string()), None);
        let compiled = graph.compile().expect("graph compiles");
        let result = compiled.invoke(0).await;
        assert!(
            matches!(result, Err(AgentError::StepLimitExceeded(DEFAULT_STEP_LIMIT))),
            "expected StepLimitExceeded, got {:?}",
            result
        );
    }

    /// **Scenario**: with_step_limit overrides the default bound.
    #[tokio::test]
    async fn invoke_custom_step_limit_applies() {
        let mut graph = StateGraph::<i32>::new().with_step_limit(3);
        graph.add_node("looper", Arc::new(LoopNode));
        graph.add_edge(START, "looper");
        graph.add_conditional_edges("looper", Arc::new(|_: &i32| "looper".to_string()), None);
        let compiled = graph.compile().expect("graph compiles");
        match compiled.invoke(0).await {
            Err(AgentError::StepLimitExceeded(limit)) => assert_eq!(limit, 3),
            other => panic!("expected StepLimitExceeded(3), got {:?}", other),
        }
    }

    /// Middleware that records every node id it wraps.
    struct RecordingMiddleware {
        visited: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl crate::graph::NodeMiddleware<i32> for RecordingMiddleware {
        async fn around_run(
            &self,
            node_id: &str,
            state: i32,
            inner: Box<
                dyn FnOnce(
                        i32,
                    ) -> std::pin::Pin<
                        Box<
                            dyn std::future::Future<Output = Result<(i32, Next), AgentError>>
                                + Send,
                        >,
                    > + Send,
            >,
        ) -> Result<(i32, Next), AgentError> {
            self.visited.lock().unwrap().push(node_id.to_string());
            inner(state).await
        }
    }

    /// **Scenario**: Middleware wraps every node execution in order.
    #[tokio::test]
    async fn invoke_with_middleware_records_node_order() {
        let mw = Arc::new(RecordingMiddleware {
            visited: Mutex::new(vec![]),
        });
        let compiled = build_two_step_graph()
            .with_middleware(mw.clone())
            .compile()
            .expect("graph compiles");
        let out = compiled.invoke(0).await.unwrap();
        assert_eq!(out, 3);
        assert_eq!(
            *mw.visited.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    /// **Scenario**: A failing node aborts the run with its error.
    #[tokio::test]
    async fn invoke_node_error_propagates() {
        #[derive(Clone)]
        struct FailNode;
        #[async_trait]
        impl Node<i32> for FailNode {
            fn id(&self) -> &str {
                "fail"
            }
            async fn run(&self, _state: i32) -> Result<(i32, Next), AgentError> {
                Err(AgentError::ExecutionFailed("boom".to_string()))
            }
        }

        let mut graph = StateGraph::<i32>::new();
        graph.add_node("fail", Arc::new(FailNode));
        graph.add_edge(START, "fail");
        graph.add_edge("fail", END);
        let compiled = graph.compile().expect("graph compiles");
        let result = compiled.invoke(0).await;
        assert!(
            matches!(result, Err(AgentError::ExecutionFailed(ref m)) if m == "boom"),
            "got {:?}",
            result
        );
    }
}
