//! Tools the model can call, and the registry that holds them.
//!
//! The deployed agent registers exactly one tool, `retriever_tool`.

mod registry;
mod retriever_tool;
mod r#trait;

pub use r#trait::Tool;
pub use registry::ToolRegistry;
pub use retriever_tool::{
    RetrieverTool, BUDGET_EXHAUSTED_MESSAGE, RETRIEVER_UNAVAILABLE, TOOL_RETRIEVER,
};
