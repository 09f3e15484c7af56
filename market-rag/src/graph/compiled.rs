//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the nodes, the entry node and a map from
//! node id to how the next node is chosen (plain edge or conditional router).

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the entry node; after each node, a conditional router (when present)
/// or the node's returned `Next` picks the next node.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (from START).
    pub(super) first_node_id: String,
    /// Node id -> Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Resolves where to go after `current_id` returned `next`. `None` means stop.
    fn resolve_next(&self, current_id: &str, next: Next, state: &S) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                tracing::debug!(from = %current_id, to = %target, "conditional routing");
                Some(target)
            }
            entry => match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => match entry {
                    Some(NextEntry::Unconditional(id)) => Some(id.clone()),
                    _ => None,
                },
            },
        }
    }

    /// Runs the graph from the entry node until END and returns the final state.
    ///
    /// A node error aborts the run and is returned unchanged.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        if self.nodes.is_empty() || !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        log_graph_start();

        let mut state = state;
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;
        loop {
            let node = match self.nodes.get(&current_id) {
                Some(node) => Arc::clone(node),
                None => {
                    let e = AgentError::ExecutionFailed(format!("unknown node: {}", current_id));
                    log_graph_error(&e);
                    return Err(e);
                }
            };

            log_node_start(&current_id);
            let (new_state, next) = match node.run(state).await {
                Ok(output) => output,
                Err(e) => {
                    log_graph_error(&e);
                    return Err(e);
                }
            };
            state = new_state;
            steps += 1;

            let next_id = self.resolve_next(&current_id, next, &state);
            log_node_complete(&current_id, next_id.as_deref());
            match next_id {
                Some(id) if id != END => current_id = id,
                _ => break,
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
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::graph::{Next, Node, StateGraph, END, START};

    #[derive(Clone, Debug, Default)]
    struct Trace(Vec<String>);

    struct Step {
        id: &'static str,
        next: Next,
    }

    #[async_trait]
    impl Node<Trace> for Step {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, mut state: Trace) -> Result<(Trace, Next), AgentError> {
            state.0.push(self.id.to_string());
            Ok((state, self.next.clone()))
        }
    }

    struct Failing;

    #[async_trait]
    impl Node<Trace> for Failing {
        fn id(&self) -> &str {
            "failing"
        }
        async fn run(&self, _state: Trace) -> Result<(Trace, Next), AgentError> {
            Err(AgentError::ExecutionFailed("boom".into()))
        }
    }

    #[tokio::test]
    async fn invoke_empty_graph_returns_execution_failed() {
        let graph = CompiledStateGraph::<Trace> {
            nodes: HashMap::new(),
            first_node_id: "a".into(),
            next_map: HashMap::new(),
        };
        match graph.invoke(Trace::default()).await {
            Err(AgentError::ExecutionFailed(msg)) => assert!(msg.contains("empty graph")),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invoke_follows_linear_edges() {
        let mut graph = StateGraph::<Trace>::new();
        graph.add_node("a", Arc::new(Step { id: "a", next: Next::Continue }));
        graph.add_node("b", Arc::new(Step { id: "b", next: Next::Continue }));
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", END);
        let out = graph.compile().unwrap().invoke(Trace::default()).await.unwrap();
        assert_eq!(out.0, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn invoke_next_end_stops_early() {
        let mut graph = StateGraph::<Trace>::new();
        graph.add_node("a", Arc::new(Step { id: "a", next: Next::End }));
        graph.add_node("b", Arc::new(Step { id: "b", next: Next::Continue }));
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", END);
        let out = graph.compile().unwrap().invoke(Trace::default()).await.unwrap();
        assert_eq!(out.0, vec!["a"]);
    }

    #[tokio::test]
    async fn invoke_propagates_node_error() {
        let mut graph = StateGraph::<Trace>::new();
        graph.add_node("failing", Arc::new(Failing));
        graph.add_edge(START, "failing");
        graph.add_edge("failing", END);
        let err = graph.compile().unwrap().invoke(Trace::default()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
