//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when edges reference unknown nodes or the
//! edge set cannot be executed (no entry, no exit, ambiguous branching).

use thiserror::Error;

/// Error when compiling a state graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Neither a plain edge nor a conditional path reaches END.
    #[error("graph must have at least one path to END")]
    MissingEnd,

    /// Edges cannot be followed deterministically (e.g. two edges leave one node, linear cycle).
    #[error("invalid edges: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of NodeNotFound contains "node not found" and the node id.
    #[test]
    fn compilation_error_display_node_not_found() {
        let s = CompilationError::NodeNotFound("x".to_string()).to_string();
        assert!(s.contains("node not found"), "{}", s);
        assert!(s.contains("x"), "{}", s);
    }

    /// **Scenario**: Display of MissingStart / MissingEnd mention the sentinel.
    #[test]
    fn compilation_error_display_missing_start_and_end() {
        let s = CompilationError::MissingStart.to_string();
        assert!(s.to_lowercase().contains("start"), "{}", s);
        let s = CompilationError::MissingEnd.to_string();
        assert!(s.to_lowercase().contains("end"), "{}", s);
    }
}
