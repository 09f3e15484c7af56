//! State types for the retrieval agent graph.
//!
//! The graph state flows through [`StateGraph`](crate::graph::StateGraph) and is
//! read/written by [`ReasonNode`](crate::ReasonNode) and [`ToolExecNode`](crate::ToolExecNode).
//!
//! # Main types
//!
//! - [`RagState`]: conversation messages plus the per-turn tool-call budget counters;
//!   use [`RagState::last_assistant_reply`] for the final answer.
//! - [`ToolCall`]: one tool invocation requested by the model; consumed exactly once by
//!   the tool execution step.
//!
//! # Example
//!
//! ```rust
//! use market_rag::{Message, RagState};
//!
//! let mut state = RagState::default();
//! state.messages.push(Message::user("What stocks are listed on NASDAQ?"));
//! // ... pass state to CompiledStateGraph::invoke
//! ```

pub mod rag_state;

pub use rag_state::{RagState, ToolCall};
