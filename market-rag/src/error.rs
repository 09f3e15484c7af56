//! Agent execution error types.
//!
//! Returned by graph nodes and `CompiledStateGraph::invoke`. Tool failures never
//! reach this type: they are converted to tool output text at the tool boundary.

use thiserror::Error;

/// Agent execution error.
///
/// Only failures that must abort the current invocation end up here (e.g. the
/// reasoning model call failed). Unknown tools, tool errors and budget exhaustion
/// are handled inline as conversation messages.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
