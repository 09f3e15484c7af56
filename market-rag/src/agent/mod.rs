//! The retrieval agent: reason and tool-execution nodes, the continuation
//! predicate, and the runner that wires them into a bounded loop.
//!
//! ```text
//! START → reason ──(should_continue)──→ tools ─┐
//!            ▲            │                     │
//!            │            └────────→ END        │
//!            └──────────────────────────────────┘
//! ```

mod budget;
mod condition;
mod context;
mod error;
mod history;
mod reason_node;
mod runner;
mod tool_node;

pub use budget::{ToolBudget, MAX_TOOL_CALLS};
pub use condition::{route_after_reason, should_continue};
pub use context::AgentContext;
pub use error::{InitError, RunError};
pub use history::{
    build_initial_state, collapse_history, HistoryEntry, DEFAULT_HISTORY_WINDOW, HISTORY_LABEL,
};
pub use reason_node::{ReasonNode, REASON_NODE};
pub use runner::{build_retriever, build_tool_registry, RagAgent, RagService};
pub use tool_node::{ToolExecNode, TOOLS_NODE, UNKNOWN_TOOL_MESSAGE};
