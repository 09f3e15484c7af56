//! Tool-call budget: how many successful tool invocations one turn may make.

use serde::{Deserialize, Serialize};

/// Default limit on successful tool invocations per turn.
pub const MAX_TOOL_CALLS: u32 = 3;

/// Two thresholds over the per-turn tool-call counter.
///
/// - `continue_limit`: the loop keeps routing to tools while `count <= continue_limit`.
/// - `exhaustion_threshold`: once `count > exhaustion_threshold` the reasoning step
///   appends the stop-calling-tools directive and tools refuse real work.
///
/// Both default to [`MAX_TOOL_CALLS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolBudget {
    pub continue_limit: u32,
    pub exhaustion_threshold: u32,
}

impl Default for ToolBudget {
    fn default() -> Self {
        Self::uniform(MAX_TOOL_CALLS)
    }
}

impl ToolBudget {
    /// Budget where both thresholds equal `max`.
    pub fn uniform(max: u32) -> Self {
        Self {
            continue_limit: max,
            exhaustion_threshold: max,
        }
    }

    /// Whether another tool pass is still allowed at counter value `count`.
    pub fn allows_continuation(&self, count: u32) -> bool {
        count <= self.continue_limit
    }

    /// Whether the budget is used up at counter value `count`.
    pub fn is_exhausted(&self, count: u32) -> bool {
        count > self.exhaustion_threshold
    }

    /// Whether `rounds` tool passes have used up the loop, whatever their outcome.
    ///
    /// Failed and unknown calls never move the success counter, so this is what
    /// ends a turn whose tools keep failing.
    pub fn rounds_exhausted(&self, rounds: u32) -> bool {
        rounds > self.continue_limit
    }

    /// Whether the next reasoning call must be told to answer without tools.
    pub fn must_answer(&self, count: u32, rounds: u32) -> bool {
        self.is_exhausted(count) || self.rounds_exhausted(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_boundaries() {
        let b = ToolBudget::default();
        assert!(b.allows_continuation(0));
        assert!(b.allows_continuation(3));
        assert!(!b.allows_continuation(4));
        assert!(!b.is_exhausted(3));
        assert!(b.is_exhausted(4));
    }

    #[test]
    fn thresholds_are_independent() {
        let b = ToolBudget {
            continue_limit: 1,
            exhaustion_threshold: 5,
        };
        assert!(!b.allows_continuation(2));
        assert!(!b.is_exhausted(2));
    }

    /// **Scenario**: four passes end the turn even when none of them succeeded.
    #[test]
    fn rounds_force_an_answer_without_successes() {
        let b = ToolBudget::default();
        assert!(!b.rounds_exhausted(3));
        assert!(b.rounds_exhausted(4));
        assert!(!b.must_answer(0, 3));
        assert!(b.must_answer(0, 4));
        assert!(b.must_answer(4, 0));
    }
}
