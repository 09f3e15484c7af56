//! # market-rag
//!
//! A retrieval-augmented question-answering agent for stock-market documents,
//! built as a small state graph: a reasoning step calls the model, a tool step
//! runs the retrieval tool, and a continuation predicate with a per-turn tool
//! budget decides when to stop.
//!
//! ## Design principles
//!
//! - **Single state type**: [`RagState`] flows through every node; nodes take it by value
//!   and return it updated.
//! - **Bounded loop**: [`ToolBudget`] caps successful tool calls per turn; past the cap the
//!   model is told to answer, and the predicate ends the run.
//! - **Errors stay inside tools**: unknown tools, tool failures and retrieval failures reach
//!   the model as tool output text. Only a failed model call aborts a run.
//! - **No globals**: model, prompt, tools and budget live in an [`AgentContext`] shared by `Arc`.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`]: build and run state graphs.
//! - [`agent`]: [`ReasonNode`], [`ToolExecNode`], [`should_continue`], [`RagAgent`], [`RagService`].
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`RetrieverTool`].
//! - [`retrieval`]: [`Retriever`], [`RouterRetriever`], [`VectorIndexRetriever`], [`route_query`].
//! - [`config`]: [`RagConfig`] read from the environment.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use market_rag::{
//!     build_tool_registry, AgentContext, LlmResponse, MockLlm, RagAgent, ToolBudget,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockLlm::new(vec![LlmResponse::text("The S&P 500 gained 23% in 2024.")]));
//! let ctx = AgentContext::new(llm, "You answer market questions.", Arc::new(build_tool_registry(None)), ToolBudget::default());
//! let agent = RagAgent::new(ctx)?;
//! let answer = agent.run(&[], "How did the S&P do?").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod retrieval;
pub mod state;
pub mod tool_source;
pub mod tools;

pub use agent::{
    build_tool_registry, should_continue, AgentContext, HistoryEntry, InitError, RagAgent,
    RagService, ReasonNode, RunError, ToolBudget, ToolExecNode, MAX_TOOL_CALLS,
};
pub use config::RagConfig;
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, MockLlm};
pub use message::Message;
pub use retrieval::{
    route_query, DocumentChunk, Retriever, RouteChoice, RouterRetriever, VectorIndexRetriever,
};
pub use state::{RagState, ToolCall};
pub use tools::{RetrieverTool, Tool, ToolRegistry};
