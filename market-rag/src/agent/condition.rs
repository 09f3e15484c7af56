//! Continuation predicate: route to tools again, or stop.

use tracing::info;

use crate::graph::END;
use crate::state::RagState;

use super::tool_node::TOOLS_NODE;
use super::ToolBudget;

/// True iff the last message requests tools and both counters are within `continue_limit`.
///
/// `tool_rounds` bounds the loop even when every call fails or names an unknown
/// tool, since those never move `tool_call_count`.
pub fn should_continue(state: &RagState, budget: &ToolBudget) -> bool {
    let requested = !state.pending_tool_calls().is_empty();
    let decision = requested
        && budget.allows_continuation(state.tool_call_count)
        && !budget.rounds_exhausted(state.tool_rounds);
    info!(
        should_continue = decision,
        tool_call_count = state.tool_call_count,
        tool_rounds = state.tool_rounds,
        "check continue"
    );
    decision
}

/// Routing key for the conditional edge out of the reason node.
pub fn route_after_reason(state: &RagState, budget: &ToolBudget) -> &'static str {
    if should_continue(state, budget) {
        TOOLS_NODE
    } else {
        END
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::state::ToolCall;

    fn requesting(count: u32, rounds: u32) -> RagState {
        let mut state = RagState::new(vec![Message::assistant_with_tools(
            "",
            vec![ToolCall {
                id: "c".into(),
                name: "retriever_tool".into(),
                arguments: "{}".into(),
            }],
        )]);
        state.tool_call_count = count;
        state.tool_rounds = rounds;
        state
    }

    #[test]
    fn continues_up_to_and_including_limit() {
        let budget = ToolBudget::default();
        assert!(should_continue(&requesting(0, 0), &budget));
        assert!(should_continue(&requesting(3, 3), &budget));
        assert!(!should_continue(&requesting(4, 3), &budget));
    }

    #[test]
    fn stops_without_tool_calls() {
        let state = RagState::new(vec![Message::assistant("done")]);
        assert!(!should_continue(&state, &ToolBudget::default()));
        assert_eq!(route_after_reason(&state, &ToolBudget::default()), END);
    }

    /// **Scenario**: rounds past the limit stop the loop even when nothing succeeded.
    #[test]
    fn rounds_guard_stops_failing_loops() {
        let budget = ToolBudget::default();
        assert!(!should_continue(&requesting(0, 4), &budget));
        assert_eq!(route_after_reason(&requesting(0, 0), &budget), TOOLS_NODE);
    }
}
