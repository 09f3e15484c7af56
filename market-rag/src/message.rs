//! Message types for agent state.
//!
//! Message roles: System (synthesized per model call, never stored in history),
//! User, Assistant (optionally carrying tool calls) and ToolResult (answers one
//! tool call by id). Used by `RagState::messages` and by `LlmClient::invoke`.

use serde::{Deserialize, Serialize};

use crate::state::ToolCall;

/// A single message in the conversation.
///
/// Closed set of roles; the loop only ever reads the final `Assistant` text as output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; placed first in the list sent to the model.
    System(String),
    /// User input (or the collapsed previous-conversation context).
    User(String),
    /// Model reply; `tool_calls` is empty when the model answered in plain text.
    Assistant {
        content: String,
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    /// Output of one tool call, tied to the request by `tool_call_id`.
    ToolResult {
        tool_call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Creates an assistant message that requests tool calls.
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Creates a tool result message answering the call with `tool_call_id`.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Tool calls carried by this message; empty for every role except a tool-requesting Assistant.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    /// Text content regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) => s,
            Self::Assistant { content, .. } | Self::ToolResult { content, .. } => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors produce the correct variant with content.
    #[test]
    fn message_constructors() {
        assert!(matches!(Message::system("s"), Message::System(c) if c == "s"));
        assert!(matches!(Message::user("u"), Message::User(c) if c == "u"));
        let ast = Message::assistant("a");
        assert_eq!(ast.content(), "a");
        assert!(ast.tool_calls().is_empty());
        let tr = Message::tool_result("call-1", "retriever_tool", "doc");
        assert!(matches!(
            &tr,
            Message::ToolResult { tool_call_id, name, content }
                if tool_call_id == "call-1" && name == "retriever_tool" && content == "doc"
        ));
    }

    /// **Scenario**: only Assistant messages expose tool calls.
    #[test]
    fn tool_calls_only_on_assistant() {
        let call = ToolCall {
            id: "call-1".into(),
            name: "retriever_tool".into(),
            arguments: r#"{"query":"nasdaq"}"#.into(),
        };
        let ast = Message::assistant_with_tools("", vec![call.clone()]);
        assert_eq!(ast.tool_calls(), &[call]);
        assert!(Message::user("hi").tool_calls().is_empty());
        assert!(Message::tool_result("call-1", "t", "x").tool_calls().is_empty());
    }

    /// **Scenario**: assistant messages without a `tool_calls` field deserialize with none.
    #[test]
    fn assistant_tool_calls_default_on_deserialize() {
        let m: Message = serde_json::from_str(r#"{"Assistant":{"content":"done"}}"#).unwrap();
        assert_eq!(m, Message::assistant("done"));
    }
}
