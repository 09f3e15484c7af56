//! Shared, immutable collaborators of the agent loop.

use std::sync::Arc;

use crate::llm::LlmClient;
use crate::tools::ToolRegistry;

use super::ToolBudget;

/// Everything the reasoning and tool nodes need, built once at initialization.
///
/// **Interaction**: Held by `RagAgent`; cloned (cheaply, all `Arc`) into `ReasonNode`
/// and `ToolExecNode`.
#[derive(Clone)]
pub struct AgentContext {
    /// Chat model, already bound to the registry's tool specs.
    pub llm: Arc<dyn LlmClient>,
    /// Base system prompt; the budget directive is appended per call when needed.
    pub system_prompt: String,
    pub tools: Arc<ToolRegistry>,
    pub budget: ToolBudget,
}

impl AgentContext {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        system_prompt: impl Into<String>,
        tools: Arc<ToolRegistry>,
        budget: ToolBudget,
    ) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            tools,
            budget,
        }
    }
}
