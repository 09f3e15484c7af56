//! Error types for building and running the agent.

use crate::error::AgentError;
use crate::graph::CompilationError;
use crate::retrieval::RetrievalError;

/// Failure of one `run` call.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("agent not initialized; call init first")]
    NotInitialized,
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

/// Failure while building the agent from configuration.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("retrieval setup failed: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
}
