//! Context passed into tool calls for the current step.

use crate::agent::ToolBudget;

/// Per-call context available to tools during execution.
///
/// Built by ToolExecNode from the live state before each call, so a tool sees the
/// counter value including calls already made earlier in the same pass.
///
/// **Interaction**: Passed to `Tool::call`; `RetrieverTool` refuses to search once
/// `budget.is_exhausted(tool_call_count)`.
#[derive(Debug, Clone, Default)]
pub struct ToolCallContext {
    /// Successful tool invocations so far in this turn.
    pub tool_call_count: u32,
    /// Budget the counter is measured against.
    pub budget: ToolBudget,
}

impl ToolCallContext {
    pub fn new(tool_call_count: u32, budget: ToolBudget) -> Self {
        Self {
            tool_call_count,
            budget,
        }
    }

    /// True when tools should stop doing real work for this turn.
    pub fn budget_exhausted(&self) -> bool {
        self.budget.is_exhausted(self.tool_call_count)
    }
}
