//! State graph: nodes + edges (plain and conditional), compile and invoke.
//!
//! The agent loop is one `StateGraph<RagState>`: `START → reason`, a conditional edge
//! `reason → {tools | END}` and `tools → reason`.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
