//! Conversation state for one agent turn.
//!
//! RagState holds the append-only message history and the tool-call counters the
//! continuation predicate and the reasoning step consult. ToolCall aligns with the
//! OpenAI `tool_calls[]` item (id, function name, JSON arguments).

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A single tool invocation requested by the model.
///
/// **Interaction**: Written by ReasonNode from the LLM reply (inside
/// `Message::Assistant`); read by ToolExecNode, which answers it with exactly one
/// `Message::ToolResult` carrying the same `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique id within the conversation; echoed by the matching tool result.
    pub id: String,
    /// Tool name as registered in the ToolRegistry.
    pub name: String,
    /// Arguments as a JSON string; parsed when the tool runs.
    pub arguments: String,
}

/// State for the reason → tools → reason loop.
///
/// Owned by a single invocation; nodes take it by value and return the updated state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagState {
    /// Conversation history (User, Assistant, ToolResult). Append-only within a turn.
    pub messages: Vec<Message>,
    /// Successful invocations of known tools in this turn. Never decreases.
    #[serde(default)]
    pub tool_call_count: u32,
    /// Tool execution passes completed in this turn, successful or not.
    #[serde(default)]
    pub tool_rounds: u32,
}

impl RagState {
    /// Fresh state holding the given messages and zeroed counters.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tool_call_count: 0,
            tool_rounds: 0,
        }
    }

    /// Tool calls requested by the most recent message (empty unless it is a tool-requesting Assistant).
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.messages
            .last()
            .map(Message::tool_calls)
            .unwrap_or(&[])
    }

    /// Returns the content of the chronologically last Assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant { content, .. } => Some(content.clone()),
            _ => None,
        })
    }

    /// Number of tool calls requested so far in this conversation.
    pub fn requested_tool_call_total(&self) -> usize {
        self.messages.iter().map(|m| m.tool_calls().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: &str) -> ToolCall {
        ToolCall {
            id: id.into(),
            name: "retriever_tool".into(),
            arguments: "{}".into(),
        }
    }

    #[test]
    fn pending_tool_calls_reads_only_last_message() {
        let mut state = RagState::new(vec![
            Message::user("q"),
            Message::assistant_with_tools("", vec![call("a")]),
        ]);
        assert_eq!(state.pending_tool_calls().len(), 1);
        state.messages.push(Message::tool_result("a", "retriever_tool", "doc"));
        assert!(state.pending_tool_calls().is_empty());
    }

    #[test]
    fn last_assistant_reply_skips_tool_results() {
        let state = RagState::new(vec![
            Message::user("q"),
            Message::assistant("first"),
            Message::tool_result("a", "retriever_tool", "doc"),
        ]);
        assert_eq!(state.last_assistant_reply().as_deref(), Some("first"));
        assert_eq!(RagState::default().last_assistant_reply(), None);
    }

    #[test]
    fn requested_tool_call_total_counts_every_assistant_turn() {
        let state = RagState::new(vec![
            Message::assistant_with_tools("", vec![call("a"), call("b")]),
            Message::assistant_with_tools("", vec![call("c")]),
        ]);
        assert_eq!(state.requested_tool_call_total(), 3);
    }
}
